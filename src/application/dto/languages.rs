#[derive(Debug, Clone)]
pub struct LanguageInfoDto {
    pub iso_code: String,
    pub name: String,
    pub native_name: String,
    pub url: String,
    pub is_current: bool,
}

#[derive(Debug, Clone)]
pub struct LanguageListDto {
    pub languages: Vec<LanguageInfoDto>,
    pub current_language: String,
}
