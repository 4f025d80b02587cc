diesel::table! {
    notes (id) {
        id -> Int4,
        title -> Varchar,
        content -> Text,
        created -> Timestamptz,
        expires -> Timestamptz,
    }
}
