use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Account role. The original deployment stored companies and developers in
/// separate collections; here a single table carries the discriminant and the
/// unique indexes on username/email span both roles.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "company")]
    Company,
    #[sea_orm(string_value = "developer")]
    Developer,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Company => "company",
            Role::Developer => "developer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "company" => Ok(Role::Company),
            "developer" => Ok(Role::Developer),
            other => Err(format!(
                "invalid role '{other}', expected 'company' or 'developer'"
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[sea_orm(column_name = "password_hash")]
    pub password_hash: String,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::posts::Entity")]
    Posts,
}

impl Related<super::posts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("company".parse::<Role>().unwrap(), Role::Company);
        assert_eq!("developer".parse::<Role>().unwrap(), Role::Developer);
        assert!("admin".parse::<Role>().is_err());
        assert!("Company".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::Company, Role::Developer] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }
}
