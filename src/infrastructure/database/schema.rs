diesel::table! {
    use diesel::sql_types::*;
    use pgvector::sql_types::*;

    bots (id) {
        id -> Uuid,
        name -> Text,
        system_prompt -> Text,
        is_active -> Bool,
        settings_top_k -> Nullable<Int4>,
        settings_similarity_threshold -> Nullable<Float4>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    use diesel::sql_types::*;
    use pgvector::sql_types::*;

    documents (id) {
        id -> Uuid,
        filename -> Text,
        content -> Text,
        file_type -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    use diesel::sql_types::*;
    use pgvector::sql_types::*;

    document_chunks (id) {
        id -> Uuid,
        document_id -> Uuid,
        chunk_text -> Text,
        chunk_index -> Int4,
        embedding -> Vector,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    use diesel::sql_types::*;
    use pgvector::sql_types::*;

    bot_documents (bot_id, document_id) {
        bot_id -> Uuid,
        document_id -> Uuid,
    }
}

diesel::table! {
    use diesel::sql_types::*;
    use pgvector::sql_types::*;

    conversations (id) {
        id -> Uuid,
        bot_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    use diesel::sql_types::*;
    use pgvector::sql_types::*;

    turns (id) {
        id -> Uuid,
        conversation_id -> Uuid,
        message -> Text,
        response -> Text,
        context_chunk_ids -> Array<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(document_chunks -> documents (document_id));
diesel::joinable!(bot_documents -> documents (document_id));
diesel::joinable!(bot_documents -> bots (bot_id));
diesel::joinable!(conversations -> bots (bot_id));
diesel::joinable!(turns -> conversations (conversation_id));

diesel::allow_tables_to_appear_in_same_query!(
    bots,
    documents,
    document_chunks,
    bot_documents,
    conversations,
    turns,
);
