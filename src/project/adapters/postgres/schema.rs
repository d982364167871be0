//! Diesel schema for project persistence.

diesel::table! {
    /// Project records grouping tasks.
    projects (id) {
        /// Store-assigned project identifier.
        id -> Int8,
        /// Unique project name.
        #[max_length = 120]
        name -> Varchar,
        /// Optional description.
        #[max_length = 500]
        description -> Nullable<Varchar>,
        /// Optional display colour.
        #[max_length = 20]
        color -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
