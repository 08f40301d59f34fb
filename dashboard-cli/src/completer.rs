use std::sync::Arc;

use dashboard_core::directory;
use inquire::{
    CustomUserError,
    autocompletion::{Autocomplete, Replacement},
};

const SUGGESTION_LIMIT: usize = 10;

/// Feeds the city directory into the search prompt.
#[derive(Debug, Clone)]
pub struct CityCompleter {
    cities: Arc<Vec<String>>,
}

impl CityCompleter {
    pub fn new(cities: Arc<Vec<String>>) -> Self {
        Self { cities }
    }
}

impl Autocomplete for CityCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        Ok(directory::filter_limited(&self.cities, input, SUGGESTION_LIMIT))
    }

    fn get_completion(
        &mut self,
        input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion
            .or_else(|| directory::filter_limited(&self.cities, input, 1).into_iter().next()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completer() -> CityCompleter {
        let cities = ["Lagos", "Paris", "Parma", "Lahore"].iter().map(|c| c.to_string()).collect();
        CityCompleter::new(Arc::new(cities))
    }

    #[test]
    fn suggestions_follow_directory_filter() {
        let mut c = completer();

        assert_eq!(c.get_suggestions("par").unwrap(), vec!["Paris", "Parma"]);
        assert!(c.get_suggestions("").unwrap().is_empty());
    }

    #[test]
    fn completion_prefers_highlighted_suggestion() {
        let mut c = completer();

        assert_eq!(c.get_completion("la", Some("Lahore".into())).unwrap(), Some("Lahore".into()));
        assert_eq!(c.get_completion("la", None).unwrap(), Some("Lagos".into()));
        assert_eq!(c.get_completion("zz", None).unwrap(), None);
    }
}
