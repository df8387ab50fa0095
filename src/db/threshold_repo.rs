use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::ThresholdRecord;

/// Insert a threshold observation.
pub async fn insert_threshold(
    pool: &PgPool,
    bin_number: &str,
    amount: Decimal,
    triggered: bool,
) -> anyhow::Result<ThresholdRecord> {
    let row = sqlx::query_as::<_, ThresholdRecord>(
        r#"
        INSERT INTO threshold_records (bin_number, amount, triggered)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(bin_number)
    .bind(amount)
    .bind(triggered)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Get all observations for a BIN, lowest amount first.
pub async fn get_thresholds_for_bin(
    pool: &PgPool,
    bin_number: &str,
) -> anyhow::Result<Vec<ThresholdRecord>> {
    let rows = sqlx::query_as::<_, ThresholdRecord>(
        "SELECT * FROM threshold_records WHERE bin_number = $1 ORDER BY amount, recorded_at",
    )
    .bind(bin_number)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
