// Diesel table definitions matching `migrations/`.

diesel::table! {
    user_points (user_id) {
        user_id -> Text,
        points -> BigInt,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    polls (seq) {
        seq -> BigInt,
        id -> Text,
        title -> Text,
        option_a -> Text,
        option_b -> Text,
        creator_id -> Text,
        status -> Text,
        total_points_a -> BigInt,
        total_points_b -> BigInt,
        created_at -> Text,
        resolved_at -> Nullable<Text>,
    }
}

diesel::table! {
    bets (seq) {
        seq -> BigInt,
        id -> Text,
        user_id -> Text,
        poll_id -> Text,
        amount -> BigInt,
        choice -> Text,
        placed_at -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(bets, polls, user_points);
