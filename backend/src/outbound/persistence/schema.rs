//! Diesel table definitions; must track `backend/migrations`.

diesel::table! {
    users (id) {
        id -> Uuid,
        username -> Varchar,
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// `amount_minor` holds cents; `seq` orders rows sharing a timestamp.
    expenses (id) {
        id -> Uuid,
        seq -> Int8,
        owner_id -> Uuid,
        title -> Varchar,
        category -> Varchar,
        amount_minor -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    session_tokens (digest) {
        digest -> Varchar,
        user_id -> Uuid,
        created_at -> Timestamptz,
        expires_at -> Timestamptz,
    }
}

diesel::joinable!(expenses -> users (owner_id));
diesel::joinable!(session_tokens -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, expenses, session_tokens);
