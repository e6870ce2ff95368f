//! Diesel schema for todo persistence.

diesel::table! {
    /// Todo records.
    todos (id) {
        /// Store-assigned todo identifier.
        id -> Int8,
        /// Todo name.
        #[max_length = 100]
        name -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Canonical priority name.
        #[max_length = 10]
        priority -> Varchar,
    }
}

diesel::table! {
    /// Steps nested under a todo.
    steps (id) {
        /// Store-assigned step identifier.
        id -> Int8,
        /// Owning todo.
        todo_id -> Int8,
        /// Step name.
        #[max_length = 100]
        name -> Varchar,
        /// Free-form description.
        description -> Text,
    }
}

diesel::joinable!(steps -> todos (todo_id));
diesel::allow_tables_to_appear_in_same_query!(todos, steps);
