// Mirrors `sql/create_tron_wallet.sql`.

diesel::table! {
    /// `balance` holds sun (1 TRX = 1_000_000 sun)
    tron_wallet (id) {
        id -> BigInt,
        address -> Text,
        balance -> BigInt,
        free_net_used -> BigInt,
        free_net_limit -> BigInt,
        energy_limit -> BigInt,
        energy_used -> BigInt,
        created_at -> Timestamp,
    }
}
