//! `.xlsx` rendering of an [`ExportTable`]

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use super::table::{COLUMNS, ExportTable};

pub const SHEET_NAME: &str = "Registrations";

/// Render the table as an in-memory workbook
pub fn render_xlsx(table: &ExportTable) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, column) in COLUMNS.iter().enumerate() {
        let col = col as u16;
        sheet.set_column_width(col, column.width)?;
        sheet.write_string_with_format(0, col, column.header, &header_format)?;
    }

    for (index, row) in table.rows.iter().enumerate() {
        let row_num = index as u32 + 1;
        for (col, cell) in row.cells().into_iter().enumerate() {
            sheet.write_string(row_num, col as u16, cell)?;
        }
    }

    workbook.save_to_buffer()
}
