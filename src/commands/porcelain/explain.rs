use crate::artifacts::search::matcher::ActiveCriteria;
use crate::artifacts::search::query::SearchQuery;
use anyhow::Context;
use std::io::Write;

impl SearchQuery {
    /// Print the structured form of the query as pretty JSON
    ///
    /// Alongside the parsed fields, the output carries `is_empty` and the
    /// list of `active` criteria categories the matcher would evaluate.
    pub fn explain(&self, writer: &mut impl Write) -> anyhow::Result<()> {
        let mut value = serde_json::to_value(self).context("unable to serialize query")?;

        if let Some(object) = value.as_object_mut() {
            let active = ActiveCriteria::from_query(self)
                .iter_names()
                .map(|(name, _)| name.to_lowercase())
                .collect::<Vec<_>>();

            object.insert("is_empty".to_string(), self.is_empty().into());
            object.insert("active".to_string(), active.into());
        }

        serde_json::to_writer_pretty(&mut *writer, &value)?;
        writeln!(writer)?;

        Ok(())
    }
}
