use async_trait::async_trait;
use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::NaiveDateTime;
use diesel::{
    deserialize::{self, FromSql, FromSqlRow},
    expression::AsExpression,
    prelude::*,
    serialize::{self, IsNull, Output, ToSql},
    sql_types::BigInt,
    sqlite::{Sqlite, SqliteValue},
};
use diesel_async::RunQueryDsl;
use serde::{Deserialize, Serialize};

use crate::{
    constants::tron::{SUN_PER_TRX, TRX_DECIMALS},
    data::db::{schema::tron_wallet, DbConnection, Entity, SortOrder},
};

/// TRX amount with 6 fractional digits.
///
/// Persisted as the integer amount of sun so that the stored value is exact.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = BigInt)]
#[serde(transparent)]
pub struct Balance(BigDecimal);

impl Balance {
    pub fn zero() -> Self {
        Self::from_sun(0)
    }

    /// Build a balance from an amount of sun
    pub fn from_sun(sun: i64) -> Self {
        Self(BigDecimal::new(sun.into(), TRX_DECIMALS))
    }

    /// Amount of sun, `None` if it does not fit in an `i64`
    pub fn to_sun(&self) -> Option<i64> {
        (&self.0 * BigDecimal::from(SUN_PER_TRX)).to_i64()
    }

    pub fn as_decimal(&self) -> &BigDecimal {
        &self.0
    }
}

impl Default for Balance {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Balance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl ToSql<BigInt, Sqlite> for Balance {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        let sun = self.to_sun().ok_or("balance does not fit in sun")?;
        out.set_value(sun);
        Ok(IsNull::No)
    }
}

impl FromSql<BigInt, Sqlite> for Balance {
    fn from_sql(value: SqliteValue<'_, '_, '_>) -> deserialize::Result<Self> {
        let sun = <i64 as FromSql<BigInt, Sqlite>>::from_sql(value)?;
        Ok(Self::from_sun(sun))
    }
}

/// Cached snapshot of a Tron account.
///
/// Every fetch of an address produces a new row, so an address can appear more
/// than once.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize)]
#[diesel(table_name = tron_wallet)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TronWallet {
    pub id: i64,
    pub address: String,
    pub balance: Balance,
    pub free_net_used: i64,
    pub free_net_limit: i64,
    pub energy_limit: i64,
    pub energy_used: i64,
    pub created_at: NaiveDateTime,
}

impl TronWallet {
    /// Energy left for the account, negative when usage exceeds the limit
    pub fn energy_available(&self) -> i64 {
        self.energy_limit - self.energy_used
    }

    /// Free bandwidth left for the account, negative when usage exceeds the limit
    pub fn available_bandwidth(&self) -> i64 {
        self.free_net_limit - self.free_net_used
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tron_wallet)]
pub struct NewTronWallet {
    pub address: String,
    pub balance: Balance,
    pub free_net_used: i64,
    pub free_net_limit: i64,
    pub energy_limit: i64,
    pub energy_used: i64,
}

/// Field overwrites for an existing row; `None` fields are left untouched
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = tron_wallet)]
pub struct TronWalletPatch {
    pub address: Option<String>,
    pub balance: Option<Balance>,
    pub free_net_used: Option<i64>,
    pub free_net_limit: Option<i64>,
    pub energy_limit: Option<i64>,
    pub energy_used: Option<i64>,
}

impl TronWalletPatch {
    /// Whether no field would be written
    pub fn is_empty(&self) -> bool {
        self.address.is_none()
            && self.balance.is_none()
            && self.free_net_used.is_none()
            && self.free_net_limit.is_none()
            && self.energy_limit.is_none()
            && self.energy_used.is_none()
    }
}

#[async_trait]
impl Entity for TronWallet {
    type New = NewTronWallet;
    type Patch = TronWalletPatch;

    const NAME: &'static str = "TronWallet";

    fn id(&self) -> i64 {
        self.id
    }

    async fn find_by_id(conn: &mut DbConnection<'_>, id: i64) -> QueryResult<Option<Self>> {
        tron_wallet::table
            .find(id)
            .select(TronWallet::as_select())
            .first(conn)
            .await
            .optional()
    }

    async fn load_ordered(
        conn: &mut DbConnection<'_>,
        order: SortOrder,
        window: Option<(i64, i64)>,
    ) -> QueryResult<Vec<Self>> {
        // No window loads every row
        let (limit, offset) = window.unwrap_or((i64::MAX, 0));
        let query = tron_wallet::table
            .select(TronWallet::as_select())
            .limit(limit)
            .offset(offset);

        match order {
            SortOrder::Asc => query.order_by(tron_wallet::id.asc()).load(conn).await,
            SortOrder::Desc => query.order_by(tron_wallet::id.desc()).load(conn).await,
        }
    }

    async fn count_all(conn: &mut DbConnection<'_>) -> QueryResult<i64> {
        tron_wallet::table.count().get_result(conn).await
    }

    async fn insert(conn: &mut DbConnection<'_>, new: Self::New) -> QueryResult<Self> {
        diesel::insert_into(tron_wallet::table)
            .values(new)
            .returning(TronWallet::as_returning())
            .get_result(conn)
            .await
    }

    async fn apply_patch(
        conn: &mut DbConnection<'_>,
        id: i64,
        patch: Self::Patch,
    ) -> QueryResult<Option<Self>> {
        // An empty changeset is rejected by diesel
        if patch.is_empty() {
            return Self::find_by_id(conn, id).await;
        }

        diesel::update(tron_wallet::table.find(id))
            .set(patch)
            .returning(TronWallet::as_returning())
            .get_result(conn)
            .await
            .optional()
    }

    async fn delete_by_id(conn: &mut DbConnection<'_>, id: i64) -> QueryResult<bool> {
        let deleted = diesel::delete(tron_wallet::table.find(id))
            .execute(conn)
            .await?;

        Ok(deleted > 0)
    }
}
