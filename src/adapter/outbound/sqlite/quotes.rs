//! `bazaar_info` persistence.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::info;

use super::database::ddl;
use super::database::model::QuoteRow;
use super::database::schema::bazaar_info;
use super::store::{replace_table, SqliteStore};
use crate::domain::{MarketQuote, ProductId, QuoteOrigin, QuoteSnapshot};
use crate::error::{Error, Result};
use crate::port::outbound::quote::QuoteSource;
use crate::port::outbound::store::QuoteStore;

fn to_column(value: u64, field: &str) -> Result<i64> {
    i64::try_from(value)
        .map_err(|_| Error::Parse(format!("{field} {value} does not fit an INTEGER column")))
}

fn from_column(value: i64, field: &str) -> Result<u64> {
    u64::try_from(value).map_err(|_| Error::Parse(format!("negative {field} {value} in store")))
}

fn quote_row(product_id: &ProductId, quote: &MarketQuote, captured_at: &str) -> Result<QuoteRow> {
    Ok(QuoteRow {
        product_id: product_id.to_string(),
        sell_price: quote.sell_price,
        sell_volume: to_column(quote.sell_volume, "sell_volume")?,
        sell_moving_week: to_column(quote.sell_moving_week, "sell_moving_week")?,
        sell_orders: to_column(quote.sell_orders, "sell_orders")?,
        buy_price: quote.buy_price,
        buy_volume: to_column(quote.buy_volume, "buy_volume")?,
        buy_moving_week: to_column(quote.buy_moving_week, "buy_moving_week")?,
        buy_orders: quote
            .buy_orders
            .map(|orders| to_column(orders, "buy_orders"))
            .transpose()?,
        captured_at: captured_at.to_string(),
    })
}

fn quote_from_row(row: &QuoteRow) -> Result<MarketQuote> {
    Ok(MarketQuote {
        buy_price: row.buy_price,
        sell_price: row.sell_price,
        buy_orders: row
            .buy_orders
            .map(|orders| from_column(orders, "buy_orders"))
            .transpose()?,
        sell_orders: from_column(row.sell_orders, "sell_orders")?,
        buy_volume: from_column(row.buy_volume, "buy_volume")?,
        sell_volume: from_column(row.sell_volume, "sell_volume")?,
        buy_moving_week: from_column(row.buy_moving_week, "buy_moving_week")?,
        sell_moving_week: from_column(row.sell_moving_week, "sell_moving_week")?,
    })
}

impl QuoteStore for SqliteStore {
    fn replace_quotes(&self, snapshot: &QuoteSnapshot) -> Result<usize> {
        let captured_at = snapshot.captured_at().to_rfc3339();
        let mut rows = snapshot
            .iter()
            .map(|(id, quote)| quote_row(id, quote, &captured_at))
            .collect::<Result<Vec<_>>>()?;
        rows.sort_by(|a, b| a.product_id.cmp(&b.product_id));

        let mut conn = self.connection()?;
        let stored = replace_table(
            &mut conn,
            "bazaar_info",
            ddl::CREATE_BAZAAR_INFO,
            &rows,
            |conn, chunk| {
                diesel::insert_into(bazaar_info::table)
                    .values(chunk)
                    .execute(conn)
            },
        )?;
        info!(quotes = stored, origin = %snapshot.origin(), "Stored bazaar snapshot");
        Ok(stored)
    }

    fn load_quotes(&self) -> Result<QuoteSnapshot> {
        let mut conn = self.connection()?;
        let rows: Vec<QuoteRow> = bazaar_info::table
            .select(QuoteRow::as_select())
            .load(&mut conn)?;

        let captured_at = rows
            .first()
            .map(|row| {
                DateTime::parse_from_rfc3339(&row.captured_at)
                    .map(|ts| ts.with_timezone(&Utc))
                    .map_err(|e| Error::Parse(format!("captured_at '{}': {e}", row.captured_at)))
            })
            .transpose()?
            .unwrap_or_else(Utc::now);

        let quotes = rows
            .iter()
            .map(|row| Ok((ProductId::new(row.product_id.as_str()), quote_from_row(row)?)))
            .collect::<Result<HashMap<_, _>>>()?;

        Ok(QuoteSnapshot::new(quotes, QuoteOrigin::Stored, captured_at))
    }
}

#[async_trait]
impl QuoteSource for SqliteStore {
    async fn fetch_quotes(&self) -> Result<QuoteSnapshot> {
        self.load_quotes()
    }

    fn source_name(&self) -> &'static str {
        "stored snapshot"
    }
}
