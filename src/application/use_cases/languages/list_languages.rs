use crate::application::dto::languages::{LanguageInfoDto, LanguageListDto};
use crate::application::ports::language_registry::LanguageRegistry;
use crate::domain::locale::{Language, SiteDomain};

/// Shape the configured site languages for the frontend language switcher:
/// per language a target URL plus a flag marking the one the visitor is on.
pub struct ListLanguages<'a, R: LanguageRegistry + ?Sized> {
    pub registry: &'a R,
    pub default_culture: &'a str,
}

impl<'a, R: LanguageRegistry + ?Sized> ListLanguages<'a, R> {
    pub async fn execute(
        &self,
        current_url: Option<&str>,
        base_url: &str,
    ) -> anyhow::Result<LanguageListDto> {
        let languages = self.registry.languages().await?;
        let domains = self.registry.domains().await?;

        let current = self.detect_current(current_url, &languages);
        let shaped = languages
            .into_iter()
            .map(|language| {
                let url = language_url(&language.iso_code, &domains, base_url);
                LanguageInfoDto {
                    is_current: language.iso_code.eq_ignore_ascii_case(&current),
                    native_name: language
                        .native_name
                        .clone()
                        .unwrap_or_else(|| language.name.clone()),
                    iso_code: language.iso_code,
                    name: language.name,
                    url,
                }
            })
            .collect();

        Ok(LanguageListDto {
            languages: shaped,
            current_language: current,
        })
    }

    /// The culture implied by the first path segment of the visitor's URL,
    /// matched against configured languages by full code or prefix (`da`
    /// selects `da-DK`). Defaults to the site's default culture.
    fn detect_current(&self, url: Option<&str>, languages: &[Language]) -> String {
        if let Some(url) = url {
            if let Some(segment) = url.split('/').find(|part| !part.is_empty()) {
                let segment = segment.to_lowercase();
                let hit = languages.iter().find(|language| {
                    let code = language.iso_code.to_lowercase();
                    code == segment || code.starts_with(&format!("{segment}-"))
                });
                if let Some(language) = hit {
                    return language.iso_code.clone();
                }
            }
        }
        self.default_culture.to_string()
    }
}

/// URL a language switch should land on: the culture's assigned domain if
/// one exists (scheme added when missing), otherwise the site base URL.
fn language_url(iso_code: &str, domains: &[SiteDomain], base_url: &str) -> String {
    let assigned = domains
        .iter()
        .find(|domain| domain.culture.eq_ignore_ascii_case(iso_code));
    match assigned {
        Some(domain) => {
            if domain.name.starts_with("http://") || domain.name.starts_with("https://") {
                domain.name.clone()
            } else {
                let scheme = if base_url.starts_with("http://") { "http" } else { "https" };
                format!("{scheme}://{}", domain.name)
            }
        }
        None => base_url.to_string(),
    }
}
