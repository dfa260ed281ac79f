diesel::table! {
    ingest_jobs (job_id) {
        job_id -> Integer,
        symbol -> Text,
        trade_date -> Date,
        status -> Text,
        error_message -> Nullable<Text>,
        error_kind -> Nullable<Text>,
        last_attempted -> Nullable<Timestamp>,
    }
}

diesel::table! {
    daily_prices (symbol, trade_date) {
        symbol -> Text,
        trade_date -> Date,
        open -> Double,
        high -> Double,
        low -> Double,
        close -> Double,
        adjusted_close -> Double,
        volume -> BigInt,
        dividend_amount -> Double,
        split_coefficient -> Double,
    }
}

diesel::allow_tables_to_appear_in_same_query!(ingest_jobs, daily_prices);
