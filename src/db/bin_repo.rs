use sqlx::PgPool;

use crate::models::{BinRecord, NewBinRecord};

const UNKNOWN: &str = "Unknown";

/// Insert a classified BIN. Missing advisory fields are stored as "Unknown".
pub async fn insert_bin_record(pool: &PgPool, record: &NewBinRecord) -> anyhow::Result<BinRecord> {
    let row = sqlx::query_as::<_, BinRecord>(
        r#"
        INSERT INTO bin_records (
            bin_number, ip_address, scheme, card_type, country, issuer, ip_country,
            is_3ds, risk_level, fraud_context, raw_response, source, source_url
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING *
        "#,
    )
    .bind(&record.bin_number)
    .bind(record.ip_address.as_deref().unwrap_or("0.0.0.0"))
    .bind(record.scheme.as_deref().unwrap_or(UNKNOWN))
    .bind(record.card_type.as_deref().unwrap_or(UNKNOWN))
    .bind(record.country.as_deref().unwrap_or(UNKNOWN))
    .bind(record.issuer.as_deref().unwrap_or(UNKNOWN))
    .bind(record.ip_country.as_deref().unwrap_or(UNKNOWN))
    .bind(record.is_3ds)
    .bind(record.risk_level.as_str())
    .bind(record.fraud_context)
    .bind(&record.raw_response)
    .bind(record.source.as_str())
    .bind(record.source_url.as_deref())
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Get the N most recent records, newest first.
pub async fn get_recent_records(pool: &PgPool, limit: i64) -> anyhow::Result<Vec<BinRecord>> {
    let rows = sqlx::query_as::<_, BinRecord>(
        "SELECT * FROM bin_records ORDER BY checked_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Get every record for one BIN, newest first.
pub async fn get_bin_history(pool: &PgPool, bin_number: &str) -> anyhow::Result<Vec<BinRecord>> {
    let rows = sqlx::query_as::<_, BinRecord>(
        "SELECT * FROM bin_records WHERE bin_number = $1 ORDER BY checked_at DESC",
    )
    .bind(bin_number)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Count all stored records.
pub async fn count_records(pool: &PgPool) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bin_records")
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}
