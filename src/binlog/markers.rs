use super::types::ChangeMode;

/// Start-of-block markers for one table.
///
/// Matching is plain substring containment so that whatever prefix the log
/// puts in front of `### INSERT INTO ...` is tolerated.
#[derive(Debug, Clone)]
pub struct TableMarkers {
    markers: Vec<(ChangeMode, Vec<String>)>,
}

impl TableMarkers {
    /// Builds markers for `table`, optionally qualified by `database`.
    ///
    /// The bare form ``### INSERT INTO `t` `` is always accepted; the
    /// qualified form ``### INSERT INTO `db`.`t` `` is added when a
    /// database is given.
    pub fn new(database: Option<&str>, table: &str, tracked: &[ChangeMode]) -> Self {
        let markers = tracked
            .iter()
            .map(|mode| {
                let mut candidates = Vec::with_capacity(2);
                if let Some(db) = database {
                    candidates.push(format!("### {} `{}`.`{}`", mode.keyword(), db, table));
                }
                candidates.push(format!("### {} `{}`", mode.keyword(), table));
                (*mode, candidates)
            })
            .collect();

        Self { markers }
    }

    /// Returns the mode of the first marker contained in `line`.
    pub fn classify(&self, line: &str) -> Option<ChangeMode> {
        self.markers
            .iter()
            .find(|(_, candidates)| candidates.iter().any(|marker| line.contains(marker.as_str())))
            .map(|(mode, _)| *mode)
    }
}
