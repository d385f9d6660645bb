use serde_json::{Map, Value};

/// Experience level assigned to brand-new learners.
pub const DEFAULT_EXPERIENCE_LEVEL: &str = "complete_beginner";

/// Default value for a canonical field.
///
/// `materialize` always produces a fresh `Value`; list defaults are new
/// allocations, so two migrated records never share backing storage.
#[derive(Debug, Clone, Copy)]
pub enum FieldDefault {
    Text(&'static str),
    Int(i64),
    Real(f64),
    Flag(bool),
    EmptyList,
    /// Falls back to the record's resolved `created_at` timestamp.
    CreatedAt,
}

impl FieldDefault {
    pub fn materialize(&self, created_at: &Value) -> Value {
        match self {
            FieldDefault::Text(text) => Value::String((*text).to_string()),
            FieldDefault::Int(n) => Value::from(*n),
            FieldDefault::Real(x) => Value::from(*x),
            FieldDefault::Flag(b) => Value::Bool(*b),
            FieldDefault::EmptyList => Value::Array(Vec::new()),
            FieldDefault::CreatedAt => created_at.clone(),
        }
    }
}

/// One canonical field: its name, the legacy keys it may be read from
/// (in priority order, canonical name first), and its default.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub default: FieldDefault,
}

/// Canonical user record schema, kept as data so adding a field is a
/// one-line change. Order here is the on-disk field order.
pub const CANONICAL_FIELDS: &[FieldRule] = &[
    // Basic information
    FieldRule { name: "name", aliases: &["name"], default: FieldDefault::Text("") },
    // email has a positional rule (record key wins when it looks like an
    // address); the migrator handles it explicitly.
    FieldRule { name: "email", aliases: &["email"], default: FieldDefault::Text("") },
    FieldRule { name: "password", aliases: &["password"], default: FieldDefault::Text("") },
    FieldRule { name: "experience_level", aliases: &["experience_level"], default: FieldDefault::Text(DEFAULT_EXPERIENCE_LEVEL) },
    FieldRule { name: "learning_goals", aliases: &["learning_goals"], default: FieldDefault::EmptyList },
    // Timestamps: created_at reads the legacy created_date spelling too;
    // the activity fields fall back to the resolved created_at.
    FieldRule { name: "created_at", aliases: &["created_at", "created_date"], default: FieldDefault::CreatedAt },
    FieldRule { name: "last_activity", aliases: &["last_activity"], default: FieldDefault::CreatedAt },
    FieldRule { name: "last_login", aliases: &["last_login"], default: FieldDefault::CreatedAt },
    // Progress tracking
    FieldRule { name: "lessons_completed", aliases: &["lessons_completed"], default: FieldDefault::Int(0) },
    FieldRule { name: "challenges_completed", aliases: &["challenges_completed"], default: FieldDefault::Int(0) },
    FieldRule { name: "quizzes_completed", aliases: &["quizzes_completed"], default: FieldDefault::Int(0) },
    FieldRule { name: "quizzes_taken", aliases: &["quizzes_taken"], default: FieldDefault::Int(0) },
    FieldRule { name: "projects_completed", aliases: &["projects_completed"], default: FieldDefault::Int(0) },
    FieldRule { name: "playground_uses", aliases: &["playground_uses"], default: FieldDefault::Int(0) },
    // Gamification
    FieldRule { name: "points", aliases: &["points"], default: FieldDefault::Int(0) },
    FieldRule { name: "level", aliases: &["level"], default: FieldDefault::Int(1) },
    FieldRule { name: "streak", aliases: &["streak"], default: FieldDefault::Int(0) },
    FieldRule { name: "achievements", aliases: &["achievements"], default: FieldDefault::EmptyList },
    // Performance metrics
    FieldRule { name: "average_quiz_score", aliases: &["average_quiz_score"], default: FieldDefault::Real(0.0) },
    FieldRule { name: "total_study_time", aliases: &["total_study_time"], default: FieldDefault::Int(0) },
    FieldRule { name: "days_since_start", aliases: &["days_since_start"], default: FieldDefault::Int(0) },
    // Detailed progress: *_ids is canonical, the short spellings are legacy
    FieldRule { name: "completed_lesson_ids", aliases: &["completed_lesson_ids", "completed_lessons"], default: FieldDefault::EmptyList },
    FieldRule { name: "completed_challenge_ids", aliases: &["completed_challenge_ids", "completed_challenges"], default: FieldDefault::EmptyList },
    FieldRule { name: "completed_quiz_ids", aliases: &["completed_quiz_ids", "completed_quizzes"], default: FieldDefault::EmptyList },
    FieldRule { name: "completed_project_ids", aliases: &["completed_project_ids"], default: FieldDefault::EmptyList },
    // Settings and preferences
    FieldRule { name: "notifications_enabled", aliases: &["notifications_enabled"], default: FieldDefault::Flag(true) },
    FieldRule { name: "theme", aliases: &["theme"], default: FieldDefault::Text("default") },
    FieldRule { name: "language", aliases: &["language"], default: FieldDefault::Text("en") },
];

/// Fully-defaulted canonical record. `created_at` fills all three
/// timestamp fields.
pub fn default_record(created_at: &Value) -> Map<String, Value> {
    let mut record = Map::with_capacity(CANONICAL_FIELDS.len());
    for rule in CANONICAL_FIELDS {
        record.insert(rule.name.to_string(), rule.default.materialize(created_at));
    }
    record
}

/// True when the record carries every canonical field.
pub fn is_canonical(record: &Map<String, Value>) -> bool {
    CANONICAL_FIELDS.iter().all(|rule| record.contains_key(rule.name))
}
