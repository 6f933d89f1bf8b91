use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use log::debug;

use crate::irv::{
    io_common::{parse_token, ParsedBallot, ParsedElection},
    *,
};

fn get_range(path: &str, worksheet_name: Option<&str>) -> IrvResult<Range<DataType>> {
    debug!(
        "read_excel_file: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet_name {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name })?,
        None => workbook.worksheet_range_at(0).context(EmptyExcelSnafu {})?,
    };
    wrange.context(OpeningExcelSnafu { path })
}

fn read_cell(cell: &DataType, lineno: usize) -> IrvResult<Preference> {
    match cell {
        DataType::Empty => Ok(None),
        DataType::Int(x) if *x >= 0 && *x <= u32::MAX as i64 => {
            Ok(Some(*x as u32).filter(|x| *x > 0))
        }
        DataType::Float(f) if f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64 => {
            Ok(Some(*f as u32).filter(|x| *x > 0))
        }
        DataType::String(s) if s.trim().is_empty() => Ok(None),
        DataType::String(s) => parse_token(s.trim(), lineno),
        _ => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}

fn parse_range(wrange: &Range<DataType>) -> IrvResult<ParsedElection> {
    let mut rows = wrange.rows();
    let header = rows.next().context(EmptyExcelSnafu {})?;
    let candidates: Vec<String> = header
        .iter()
        .map(|c| c.to_string().trim().to_string())
        .collect();
    debug!("read_excel_file: candidates: {:?}", candidates);

    let mut ballots: Vec<ParsedBallot> = Vec::new();
    for (idx, row) in rows.enumerate() {
        let lineno = idx + 2;
        if row.iter().all(|c| c.is_empty()) {
            debug!("read_excel_file: skipping empty row {}", lineno);
            continue;
        }
        let preferences = row
            .iter()
            .map(|c| read_cell(c, lineno))
            .collect::<IrvResult<Vec<Preference>>>()?;
        ballots.push(ParsedBallot {
            lineno,
            preferences,
        });
    }
    Ok(ParsedElection {
        candidates,
        ballots,
    })
}

pub fn read_excel_file(path: &str, worksheet_name: Option<&str>) -> IrvResult<ParsedElection> {
    let wrange = get_range(path, worksheet_name)?;
    parse_range(&wrange)
}
