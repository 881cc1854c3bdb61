use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GenderCount {
    /// `None` groups students with no recorded gender
    pub gender: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ClassCount {
    #[serde(rename = "class")]
    pub class_id: String,
    pub students: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_students: i64,
    pub total_teachers: i64,
    pub total_results: i64,
    pub gender_wise: Vec<GenderCount>,
    pub class_wise: Vec<ClassCount>,
}
