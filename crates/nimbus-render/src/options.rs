/// Field visibility configuration, populated by the CLI layer from flags.
///
/// A non-empty allow-list makes the deny-list irrelevant; with both empty
/// every field is shown. Matching is exact and case-sensitive. The same
/// rule applies at every recursion level of the table renderer, to record
/// fields and map keys alike.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    pub fields: Vec<String>,
    pub hidden_fields: Vec<String>,
}

impl ViewOptions {
    /// Allow-list constructor: show only the named fields.
    pub fn show_only(fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        ViewOptions {
            fields: fields.into_iter().map(Into::into).collect(),
            hidden_fields: Vec::new(),
        }
    }

    /// Deny-list constructor: show everything but the named fields.
    pub fn hide(fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        ViewOptions {
            fields: Vec::new(),
            hidden_fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_visible(&self, name: &str) -> bool {
        if !self.fields.is_empty() {
            return self.fields.iter().any(|field| field == name);
        }
        if !self.hidden_fields.is_empty() {
            return !self.hidden_fields.iter().any(|field| field == name);
        }
        true
    }
}

/// Visibility under optional options; absent options show everything.
pub fn is_visible(name: &str, options: Option<&ViewOptions>) -> bool {
    options.map_or(true, |options| options.is_visible(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_options_show_everything() {
        assert!(is_visible("anything", None));
    }

    #[test]
    fn empty_options_show_everything() {
        let options = ViewOptions::default();
        assert!(options.is_visible("Name"));
    }

    #[test]
    fn allow_list_is_exclusive() {
        let options = ViewOptions::show_only(["Name", "Platform"]);
        assert!(options.is_visible("Name"));
        assert!(!options.is_visible("Units"));
        // Case-sensitive, exact match.
        assert!(!options.is_visible("name"));
    }

    #[test]
    fn deny_list_hides_members() {
        let options = ViewOptions::hide(["Units"]);
        assert!(options.is_visible("Name"));
        assert!(!options.is_visible("Units"));
    }

    #[test]
    fn allow_list_wins_over_deny_list() {
        let mut options = ViewOptions::show_only(["Name"]);
        options.hidden_fields = vec!["Name".to_string()];
        // The deny-list is never consulted while the allow-list is non-empty.
        assert!(options.is_visible("Name"));
        assert!(!options.is_visible("Platform"));
    }
}
