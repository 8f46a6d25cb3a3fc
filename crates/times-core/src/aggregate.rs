//! Grouping classified records into category × year tables.

use times_model::{ClassifiedRecord, KeySchema, SummaryTable, ValueField};

/// Sums `value_field` per category key and year.
///
/// A record without a value for `value_field` contributes nothing, so a
/// cell only exists when at least one record adds to it.
pub fn aggregate<'r, I>(records: I, schema: &KeySchema, value_field: ValueField) -> SummaryTable
where
    I: IntoIterator<Item = &'r ClassifiedRecord>,
{
    let mut table = SummaryTable::new(schema.clone());
    for record in records {
        if let Some(value) = record.value(value_field) {
            table.add(schema.key_for(record), record.year, value);
        }
    }
    table
}
