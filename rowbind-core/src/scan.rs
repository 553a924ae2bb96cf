use crate::{ColumnMap, Error, Outcome, Record, Result, Value};

/// Per column outcome of a successful scan.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScanReport {
    pub columns: Vec<(String, Outcome)>,
}

impl ScanReport {
    pub fn outcome(&self, column: &str) -> Option<Outcome> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, outcome)| *outcome)
    }

    pub fn assigned(&self) -> usize {
        self.count(Outcome::Assigned)
    }

    pub fn skipped(&self) -> usize {
        self.count(Outcome::Skipped)
    }

    pub fn unmapped(&self) -> usize {
        self.count(Outcome::Unmapped)
    }

    fn count(&self, outcome: Outcome) -> usize {
        self.columns.iter().filter(|(_, v)| *v == outcome).count()
    }
}

/// Copies one row into `target`, matching columns to fields by name.
///
/// Columns without a field are ignored, values without a conversion to their field are skipped.
/// Fields whose column is missing keep their previous content. The first failing column aborts
/// the scan, fields assigned before it keep their new value.
pub fn scan<R: Record>(
    columns: &[impl AsRef<str>],
    values: &[Value],
    target: &mut R,
) -> Result<()> {
    scan_report(columns, values, target).map(|_| ())
}

/// Same as [`scan`], also returning what happened to each column.
pub fn scan_report<R: Record>(
    columns: &[impl AsRef<str>],
    values: &[Value],
    target: &mut R,
) -> Result<ScanReport> {
    if columns.len() != values.len() {
        return Err(Error::RowShape {
            columns: columns.len(),
            values: values.len(),
        });
    }
    let map = ColumnMap::resolve::<R>();
    let mut report = ScanReport {
        columns: Vec::with_capacity(columns.len()),
    };
    for (column, raw) in columns.iter().zip(values) {
        let column: &str = column.as_ref();
        let outcome = match map.get(column).and_then(|i| target.field_mut(i)) {
            Some(field) => field.assign(raw).map_err(|e| e.into_error(column))?,
            None => Outcome::Unmapped,
        };
        match outcome {
            Outcome::Assigned => {}
            Outcome::Skipped => log::trace!(
                "Column `{}` of type {} has no conversion to its field, skipped",
                column,
                raw.type_name()
            ),
            Outcome::Unmapped => log::trace!("Column `{}` has no field, ignored", column),
        }
        report.columns.push((column.to_owned(), outcome));
    }
    Ok(report)
}
