use std::collections::BTreeMap;

use crate::application::ports::dictionary::DictionaryStore;

/// Flat key/value view of the dictionary for one culture. Keys without a
/// translation in that culture fall back to the first non-empty value in
/// any culture; keys with no value at all are left out.
pub struct GetTranslations<'a, D: DictionaryStore + ?Sized> {
    pub store: &'a D,
}

impl<'a, D: DictionaryStore + ?Sized> GetTranslations<'a, D> {
    pub async fn execute(&self, culture: &str) -> anyhow::Result<BTreeMap<String, String>> {
        let mut translations = BTreeMap::new();
        for item in self.store.items().await? {
            let value = item
                .translations
                .iter()
                .find(|t| t.culture.eq_ignore_ascii_case(culture) && !t.value.is_empty())
                .or_else(|| item.translations.iter().find(|t| !t.value.is_empty()));
            if let Some(value) = value {
                translations.insert(item.key, value.value.clone());
            }
        }
        Ok(translations)
    }
}
