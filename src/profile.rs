// profile.rs
//
// Per-grid configuration. The three request spreadsheets share one engine
// and differ only in their header schema, which columns end the row on
// Enter, and which columns get a commit-time formatter.

/// Applied to a cell's trimmed text when the cell is committed (focus
/// leaves it), never on every keystroke.
pub type ColumnFormatter = fn(&str) -> String;

#[derive(Clone, Copy)]
pub enum HeaderSource {
    /// The schema is fixed and forced onto row 0 no matter what the file says.
    Fixed(&'static [&'static str]),
    /// The schema is whatever the loaded file's first row contains.
    FirstRowOfFile,
}

#[derive(Clone, Copy)]
pub struct GridProfile {
    pub name: &'static str,
    header: HeaderSource,
    /// Columns (by header name) where Enter jumps to column 0 of the next
    /// row instead of staying in the same column.
    terminators: &'static [&'static str],
    formatters: &'static [(&'static str, ColumnFormatter)],
}

/// The resolved configuration a grid editor instance runs with. Column
/// names from the profile are resolved to indices against the schema once,
/// at load time.
#[derive(Clone)]
pub struct GridConfig {
    pub header_schema: Vec<String>,
    pub enter_terminator_columns: Vec<usize>,
    pub column_formatters: Vec<(usize, ColumnFormatter)>,
}

impl GridConfig {
    pub fn is_terminator(&self, col: usize) -> bool {
        self.enter_terminator_columns.contains(&col)
    }

    pub fn formatter(&self, col: usize) -> Option<ColumnFormatter> {
        self.column_formatters
            .iter()
            .find(|(c, _)| *c == col)
            .map(|(_, f)| *f)
    }
}

impl GridProfile {
    pub fn exames() -> Self {
        GridProfile {
            name: "exames",
            header: HeaderSource::Fixed(&[
                "ra",
                "hora",
                "contraste",
                "dividir",
                "cns",
                "procedimento",
                "chave",
                "solicitacao",
            ]),
            terminators: &["solicitacao"],
            formatters: &[("hora", format_time)],
        }
    }

    pub fn internacoes() -> Self {
        GridProfile {
            name: "internacoes",
            header: HeaderSource::Fixed(&["ra", "data", "hora", "cns", "procedimento", "chave"]),
            terminators: &["chave"],
            formatters: &[("hora", format_time)],
        }
    }

    pub fn pendencias() -> Self {
        GridProfile {
            name: "pendencias",
            header: HeaderSource::FirstRowOfFile,
            terminators: &[],
            formatters: &[],
        }
    }

    /// Resolve the profile against loaded data into a concrete config.
    /// Profile entries naming a column absent from the schema are dropped.
    pub fn resolve(&self, loaded: &[Vec<String>]) -> GridConfig {
        let header_schema: Vec<String> = match self.header {
            HeaderSource::Fixed(names) => names.iter().map(|s| s.to_string()).collect(),
            HeaderSource::FirstRowOfFile => match loaded.first() {
                Some(row) if !row.is_empty() => row.clone(),
                _ => vec![String::new()],
            },
        };

        let col_of = |name: &str| header_schema.iter().position(|h| h == name);

        let enter_terminator_columns = self
            .terminators
            .iter()
            .filter_map(|name| col_of(name))
            .collect();
        let column_formatters = self
            .formatters
            .iter()
            .filter_map(|(name, f)| col_of(name).map(|c| (c, *f)))
            .collect();

        GridConfig {
            header_schema,
            enter_terminator_columns,
            column_formatters,
        }
    }
}

/// Normalize bare digit input into HH:MM. "930" becomes "09:30", "9"
/// becomes "09:00". Hours clamp to 23, minutes to 59. Empty (or digitless)
/// input stays empty so untouched cells are not filled in.
pub fn format_time(input: &str) -> String {
    let digits: String = input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(4)
        .collect();
    if digits.is_empty() {
        return String::new();
    }

    let (hour_str, minute_str) = match digits.len() {
        1 | 2 => (digits.as_str(), ""),
        3 => digits.split_at(1),
        _ => digits.split_at(2),
    };
    let hour: u32 = hour_str.parse().unwrap_or(0).min(23);
    let minute: u32 = minute_str.parse().unwrap_or(0).min(59);
    format!("{:02}:{:02}", hour, minute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_formatter_digit_counts() {
        assert_eq!(format_time("9"), "09:00");
        assert_eq!(format_time("14"), "14:00");
        assert_eq!(format_time("930"), "09:30");
        assert_eq!(format_time("0930"), "09:30");
        assert_eq!(format_time("1745"), "17:45");
    }

    #[test]
    fn time_formatter_clamps_and_strips() {
        assert_eq!(format_time("2999"), "23:59");
        assert_eq!(format_time("09:30"), "09:30");
        assert_eq!(format_time("9h30"), "09:30");
        assert_eq!(format_time(""), "");
        assert_eq!(format_time("abc"), "");
    }

    #[test]
    fn fixed_profile_resolves_names_to_indices() {
        let config = GridProfile::internacoes().resolve(&[]);
        assert_eq!(
            config.header_schema,
            vec!["ra", "data", "hora", "cns", "procedimento", "chave"]
        );
        assert_eq!(config.enter_terminator_columns, vec![5]);
        assert!(config.formatter(2).is_some());
        assert!(config.formatter(0).is_none());
        assert!(config.is_terminator(5));
        assert!(!config.is_terminator(2));
    }

    #[test]
    fn file_header_profile_takes_first_loaded_row() {
        let loaded = vec![
            vec!["ra".to_string(), "motivo".to_string()],
            vec!["123".to_string(), "x".to_string()],
        ];
        let config = GridProfile::pendencias().resolve(&loaded);
        assert_eq!(config.header_schema, vec!["ra", "motivo"]);
        assert!(config.enter_terminator_columns.is_empty());
        assert!(config.column_formatters.is_empty());
    }

    #[test]
    fn file_header_profile_survives_empty_load() {
        let config = GridProfile::pendencias().resolve(&[]);
        assert_eq!(config.header_schema.len(), 1);
    }
}
