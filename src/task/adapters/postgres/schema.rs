//! Diesel schema for task persistence.

diesel::table! {
    /// Task records, including soft-deleted ones.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Store-assigned creation sequence used for partition ordering.
        seq -> Int8,
        /// Task text.
        text -> Text,
        /// Task lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
