/// Declares a flat record and the table it is persisted to.
///
/// ```ignore
/// record! {
///     /// One team per side of a match.
///     pub struct TeamRecord in "live_teams", Replace, key(match_id: i64, team_id: Option<i64>) {
///         match_id: i64 => "BIGINT",
///         team_id: Option<i64> => "BIGINT",
///     }
/// }
/// ```
///
/// Key fields must also appear in the body; their types must be `Hash + Eq`.
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident in $table:literal, $policy:ident,
        key($($key:ident : $key_ty:ty),+ $(,)?) {
            $($(#[$field_meta:meta])* $field:ident : $ty:ty => $sql:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $($(#[$field_meta])* pub $field: $ty,)+
        }

        impl $crate::connect_duck_db::Table for $name {
            const NAME: &'static str = $table;
            const POLICY: $crate::connect_duck_db::WritePolicy =
                $crate::connect_duck_db::WritePolicy::$policy;
            const COLUMNS: &'static [$crate::connect_duck_db::Column] = &[
                $($crate::connect_duck_db::Column { name: stringify!($field), sql_type: $sql },)+
            ];
            const KEY_COLUMNS: &'static [&'static str] = &[$(stringify!($key)),+];

            type Key = ($($key_ty,)+);

            fn key(&self) -> Self::Key {
                ($(self.$key.clone(),)+)
            }

            fn values(&self) -> Vec<&dyn duckdb::ToSql> {
                vec![$(&self.$field as &dyn duckdb::ToSql),+]
            }
        }
    };
}
