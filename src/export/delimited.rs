use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use crate::decimal::Money;
use crate::errors::{CalcError, Result};
use crate::export::PeriodUnit;
use crate::types::ScheduleRow;

/// comma-delimited schedule: one header line, then one line per row
pub fn to_csv(rows: &[ScheduleRow], unit: PeriodUnit) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(unit.csv_header()).map_err(export_failed)?;
    for row in rows {
        writer
            .write_record(&[
                row.period_index.to_string(),
                row.contributed_this_period.to_string(),
                row.interest_this_period.to_string(),
                row.balance_after_period.to_string(),
            ])
            .map_err(export_failed)?;
    }

    let bytes = writer.into_inner().map_err(export_failed)?;
    let text = String::from_utf8(bytes).map_err(export_failed)?;
    log::debug!("exported {} schedule rows as csv ({} bytes)", rows.len(), text.len());
    Ok(text)
}

/// parse text produced by [`to_csv`] back into rows
pub fn parse_csv(text: &str) -> Result<Vec<ScheduleRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(export_failed)?.clone();
    if PeriodUnit::from_header(&headers).is_none() {
        return Err(CalcError::MalformedSchedule {
            line: 1,
            message: format!("unexpected header {:?}", headers.iter().collect::<Vec<_>>()),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| CalcError::MalformedSchedule {
            line: e.position().map(|p| p.line()).unwrap_or(0),
            message: e.to_string(),
        })?;
        rows.push(parse_row(&record)?);
    }
    Ok(rows)
}

fn parse_row(record: &StringRecord) -> Result<ScheduleRow> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    let malformed = |message: String| CalcError::MalformedSchedule { line, message };

    if record.len() != 4 {
        return Err(malformed(format!("expected 4 fields, found {}", record.len())));
    }

    let period_index = record[0]
        .trim()
        .parse::<u32>()
        .map_err(|e| malformed(format!("period {:?}: {e}", &record[0])))?;
    let money = |i: usize| {
        Money::from_str_exact(&record[i])
            .map_err(|e| malformed(format!("amount {:?}: {e}", &record[i])))
    };

    Ok(ScheduleRow {
        period_index,
        contributed_this_period: money(1)?,
        interest_this_period: money(2)?,
        balance_after_period: money(3)?,
    })
}

fn export_failed(e: impl std::fmt::Display) -> CalcError {
    CalcError::ExportFailed {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::growth;
    use crate::types::{Cadence, GrowthInput, ScheduleGrid};
    use proptest::prelude::{prop_assert_eq, proptest};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_csv_layout() {
        let input = GrowthInput::recurring(Money::from_major(100), Cadence::Annual, 2, dec!(10));
        let result = growth::compute(&input).unwrap();

        let text = to_csv(&result.schedule, PeriodUnit::Year).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Year,Contributed,InterestThisYear,Balance");
        assert!(lines[1].starts_with("1,100,"));
        assert!(lines[2].starts_with("2,100,"));
        assert!(text.ends_with('\n'));
        assert!(!text.contains('₹'));

        let fields: Vec<&str> = lines[2].split(',').collect();
        assert_eq!(Money::from_str_exact(fields[2]).unwrap(), Money::from_major(21));
        assert_eq!(Money::from_str_exact(fields[3]).unwrap(), Money::from_major(231));
    }

    #[test]
    fn test_monthly_header() {
        let text = to_csv(&[], PeriodUnit::Month).unwrap();
        assert_eq!(text, "Month,Contributed,InterestThisMonth,Balance\n");
    }

    #[test]
    fn test_round_trip_is_exact() {
        let input = GrowthInput::recurring(Money::from_major(1_000), Cadence::Monthly, 180, dec!(7.1));
        let result = growth::compute(&input).unwrap();

        let text = to_csv(&result.schedule, PeriodUnit::Year).unwrap();
        assert_eq!(parse_csv(&text).unwrap(), result.schedule);
    }

    #[test]
    fn test_rejects_unknown_header() {
        let err = parse_csv("Period,Paid,Interest,Balance\n1,1,1,1\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Export);
    }

    #[test]
    fn test_rejects_bad_number() {
        let err = parse_csv("Year,Contributed,InterestThisYear,Balance\n1,abc,0,0\n").unwrap_err();
        match err {
            CalcError::MalformedSchedule { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_rejects_short_row() {
        assert!(parse_csv("Year,Contributed,InterestThisYear,Balance\n1,100,0\n").is_err());
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        #[test]
        fn prop_csv_round_trip(
            amount in 0u32..250_000,
            periods in 1u32..120,
            rate_bp in 0u32..1_500,
        ) {
            let input = GrowthInput::recurring(
                Money::from(amount),
                Cadence::Monthly,
                periods,
                Decimal::new(rate_bp as i64, 2),
            )
            .with_grid(ScheduleGrid::PerPeriod);
            let result = growth::compute(&input).unwrap();

            let text = to_csv(&result.schedule, PeriodUnit::for_input(&input)).unwrap();
            prop_assert_eq!(parse_csv(&text).unwrap(), result.schedule);
        }
    }
}
