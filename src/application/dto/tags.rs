#[derive(Debug, Clone)]
pub struct TagUsageDto {
    pub tag: String,
    pub count: i64,
}
