#![allow(dead_code)]

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

use matdup::dataset::{CellValue, Dataset, MATERIAL_NUMBER};
use matdup::request::{Request, Upload};
use matdup::settings::Settings;

/// Rows of (Material Number, Qty).
pub fn parts(records: &[(&str, i64)]) -> Dataset {
    Dataset::from_records(
        &[MATERIAL_NUMBER, "Qty"],
        records
            .iter()
            .map(|&(key, qty)| vec![CellValue::from(key), CellValue::from(qty)]),
    )
    .expect("records match the columns")
}

/// (A,1),(B,2),(A,3),(C,4),(B,5)
pub fn scenario() -> Dataset {
    parts(&[("A", 1), ("B", 2), ("A", 3), ("C", 4), ("B", 5)])
}

pub const SCENARIO_CSV: &str = "Material Number,Qty\nA,1\nB,2\nA,3\nC,4\nB,5\n";

/// Flattens a dataset into (key, qty) pairs for easy comparison.
pub fn pairs(dataset: &Dataset) -> Vec<(String, i64)> {
    dataset
        .rows()
        .iter()
        .map(|row| {
            let qty = match &row.cells[1] {
                CellValue::Int(i) => *i,
                other => panic!("unexpected qty cell: {other:?}"),
            };
            (row.cells[0].to_string(), qty)
        })
        .collect()
}

pub fn indices(dataset: &Dataset) -> Vec<usize> {
    dataset.rows().iter().map(|row| row.index).collect()
}

pub fn settings_in(out: &Path) -> Settings {
    Settings {
        out: out.to_string_lossy().into_owned(),
        ..Settings::default()
    }
}

pub fn csv_request(name: &str, text: &str, settings: Settings) -> Request {
    Request::new(Some(Upload::new(name, text.as_bytes().to_vec())), settings)
        .expect("upload present")
}

/// 2024-03-05 14:07:09
pub fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 5)
        .and_then(|d| d.and_hms_opt(14, 7, 9))
        .expect("valid timestamp")
}

pub enum XlsxCell {
    Text(&'static str),
    Number(f64),
    /// Calendar date shown as `yyyy-mm-dd`.
    Date(u16, u8, u8),
    /// Elapsed time shown as `[h]:mm:ss`.
    Elapsed(u16, u8, u8),
    Blank,
}

/// Builds an in-memory xlsx workbook with one sheet per entry.
pub fn xlsx_bytes(sheets: &[(&str, Vec<Vec<XlsxCell>>)]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).expect("valid sheet name");
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                match cell {
                    XlsxCell::Text(s) => {
                        worksheet
                            .write_string(r as u32, c as u16, *s)
                            .expect("write string");
                    }
                    XlsxCell::Number(n) => {
                        worksheet
                            .write_number(r as u32, c as u16, *n)
                            .expect("write number");
                    }
                    XlsxCell::Date(y, m, d) => {
                        let date = ExcelDateTime::from_ymd(*y, *m, *d).expect("valid date");
                        let format = Format::new().set_num_format("yyyy-mm-dd");
                        worksheet
                            .write_datetime_with_format(r as u32, c as u16, &date, &format)
                            .expect("write date");
                    }
                    XlsxCell::Elapsed(h, m, s) => {
                        let time = ExcelDateTime::from_hms(*h, *m, *s).expect("valid time");
                        let format = Format::new().set_num_format("[h]:mm:ss");
                        worksheet
                            .write_datetime_with_format(r as u32, c as u16, &time, &format)
                            .expect("write time");
                    }
                    XlsxCell::Blank => {}
                }
            }
        }
    }
    workbook.save_to_buffer().expect("serialise workbook")
}
