use crate::dataset::{normalized_cells, NORMALIZED_COLUMNS, RAW_COLUMNS};
use crate::error::Result;
use crate::model::{NormalizedRow, PlayEvent, ShotLocation};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border_bottom(FormatBorder::Thin)
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    let header_format = header_format();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }
    Ok(())
}

/// Write scraped events to an Excel file (sheet "raw_data")
pub fn write_raw_events_to_xlsx(events: &[PlayEvent], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let worksheet = workbook.add_worksheet();
    write_raw_events_sheet(worksheet, events)?;

    workbook.save(path)?;
    Ok(())
}

fn write_raw_events_sheet(sheet: &mut Worksheet, events: &[PlayEvent]) -> Result<()> {
    sheet.set_name("raw_data")?;

    sheet.set_column_width(0, 70)?; // Game
    sheet.set_column_width(1, 10)?; // Time
    sheet.set_column_width(2, 10)?; // Score
    sheet.set_column_width(3, 36)?; // Play
    sheet.set_column_width(4, 30)?; // Shot Location

    write_headers(sheet, &RAW_COLUMNS)?;

    let center_format = Format::new().set_align(FormatAlign::Center);

    for (row_idx, event) in events.iter().enumerate() {
        let row = (row_idx + 1) as u32;

        sheet.write_string(row, 0, &event.game)?;
        sheet.write_string_with_format(row, 1, &event.time, &center_format)?;
        sheet.write_string_with_format(row, 2, &event.score, &center_format)?;
        sheet.write_string(row, 3, &event.play)?;
        // Blank cells stay blank so the normalizer sees them as missing
        if !event.shot_location.is_empty() {
            sheet.write_string(row, 4, &event.shot_location)?;
        }
    }

    Ok(())
}

/// Write the normalized table to an Excel file (sheet "normalized")
pub fn write_normalized_to_xlsx(rows: &[NormalizedRow], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let worksheet = workbook.add_worksheet();
    write_normalized_sheet(worksheet, rows)?;

    workbook.save(path)?;
    Ok(())
}

fn write_normalized_sheet(sheet: &mut Worksheet, rows: &[NormalizedRow]) -> Result<()> {
    sheet.set_name("normalized")?;

    let widths = [8, 10, 12, 24, 13, 10, 10, 14, 13, 8, 13, 10];
    for (col, width) in widths.iter().enumerate() {
        sheet.set_column_width(col as u16, *width)?;
    }

    write_headers(sheet, &NORMALIZED_COLUMNS)?;

    let center_format = Format::new().set_align(FormatAlign::Center);

    for (row_idx, data) in rows.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        let cells = normalized_cells(data);

        sheet.write_number_with_format(row, 0, data.season as f64, &center_format)?;
        for col in 1..9 {
            sheet.write_string_with_format(row, col as u16, &cells[col], &center_format)?;
        }
        sheet.write_number_with_format(row, 9, data.points as f64, &center_format)?;

        // Feet as a number; the sentinel stays text
        match data.shot_location {
            ShotLocation::Feet(ft) => sheet.write_number_with_format(row, 10, ft as f64, &center_format)?,
            ShotLocation::NotApplicable => sheet.write_string_with_format(row, 10, &cells[10], &center_format)?,
        };
        sheet.write_string_with_format(row, 11, &cells[11], &center_format)?;
    }

    Ok(())
}
