//! The fixed per-entity schema catalog.
//!
//! Five entity schemas cover the synthetic e-commerce dataset: users,
//! sellers, products, sales, and payments. Each is built once on first use
//! and shared read-only for the lifetime of the process; the rule constants
//! here (identifier patterns, numeric bounds, enum sets) are the engine's
//! entire configuration surface and are not runtime-mutable.

use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::builder::{FieldBuilder, SchemaBuilder};
use crate::error::QualityError;
use crate::schema::{Constraint, CrossFieldRule, EntitySchema, FieldType};

/// Absolute tolerance for monetary equality checks.
///
/// Never compare currency amounts exactly; float arithmetic and rounding
/// accumulate sub-cent drift.
pub const AMOUNT_TOLERANCE: f64 = 0.01;

/// Email address format shared by users and sellers.
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// Phone numbers allow digits, separators, and an 'x' extension marker.
const PHONE_PATTERN: &str = r"^[\d\-\+\(\)\.\sx]+$";

/// US ZIP code, with optional +4 suffix.
const ZIP_PATTERN: &str = r"^\d{5}(-\d{4})?$";

/// The known entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    /// Customer accounts
    Users,
    /// Merchant accounts
    Sellers,
    /// Catalog items
    Products,
    /// Order records referencing users, products, and sellers
    Sales,
    /// Payment records referencing sales
    Payments,
}

impl Entity {
    /// All known entities, in dependency order (referenced before referencing).
    pub const ALL: [Entity; 5] = [
        Entity::Users,
        Entity::Sellers,
        Entity::Products,
        Entity::Sales,
        Entity::Payments,
    ];

    /// The table name for this entity.
    pub fn table_name(&self) -> &'static str {
        match self {
            Entity::Users => "users",
            Entity::Sellers => "sellers",
            Entity::Products => "products",
            Entity::Sales => "sales",
            Entity::Payments => "payments",
        }
    }

    /// The schema for this entity.
    pub fn schema(&self) -> &'static EntitySchema {
        match self {
            Entity::Users => &USERS,
            Entity::Sellers => &SELLERS,
            Entity::Products => &PRODUCTS,
            Entity::Sales => &SALES,
            Entity::Payments => &PAYMENTS,
        }
    }
}

impl FromStr for Entity {
    type Err = QualityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "users" => Ok(Entity::Users),
            "sellers" => Ok(Entity::Sellers),
            "products" => Ok(Entity::Products),
            "sales" => Ok(Entity::Sales),
            "payments" => Ok(Entity::Payments),
            other => Err(QualityError::UnknownEntity(other.to_string())),
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table_name())
    }
}

static USERS: Lazy<EntitySchema> = Lazy::new(|| {
    SchemaBuilder::new("users", "user_id")
        .field(
            FieldBuilder::new("user_id", FieldType::Text)
                .pattern(r"^U\d{6}$")
                .build(),
        )
        .field(
            FieldBuilder::new("first_name", FieldType::Text)
                .length(1, 100)
                .no_injection()
                .build(),
        )
        .field(
            FieldBuilder::new("last_name", FieldType::Text)
                .length(1, 100)
                .no_injection()
                .build(),
        )
        .field(
            FieldBuilder::new("email", FieldType::Text)
                .pattern(EMAIL_PATTERN)
                .build(),
        )
        .field(
            FieldBuilder::new("phone", FieldType::Text)
                .length(10, 20)
                .pattern(PHONE_PATTERN)
                .build(),
        )
        .field(
            FieldBuilder::new("address", FieldType::Text)
                .length(5, 200)
                .no_injection()
                .build(),
        )
        .field(
            FieldBuilder::new("city", FieldType::Text)
                .length(2, 100)
                .no_injection()
                .build(),
        )
        .field(
            FieldBuilder::new("state", FieldType::Text)
                .length(2, 50)
                .no_injection()
                .build(),
        )
        .field(
            FieldBuilder::new("zip_code", FieldType::Text)
                .pattern(ZIP_PATTERN)
                .build(),
        )
        .field(
            FieldBuilder::new("country", FieldType::Text)
                .length(2, 100)
                .no_injection()
                .build(),
        )
        .field(FieldBuilder::new("date_joined", FieldType::Date).build())
        .field(FieldBuilder::new("is_active", FieldType::Bool).build())
        .field(
            FieldBuilder::new("age", FieldType::Int)
                .range(0.0, 120.0)
                .build(),
        )
        .field(
            FieldBuilder::new("gender", FieldType::Text)
                .enum_of(["M", "F", "Other"])
                .build(),
        )
        .build()
});

static SELLERS: Lazy<EntitySchema> = Lazy::new(|| {
    SchemaBuilder::new("sellers", "seller_id")
        .field(
            FieldBuilder::new("seller_id", FieldType::Text)
                .pattern(r"^S\d{4}$")
                .build(),
        )
        .field(
            FieldBuilder::new("company_name", FieldType::Text)
                .length(1, 200)
                .no_injection()
                .build(),
        )
        .field(
            FieldBuilder::new("contact_name", FieldType::Text)
                .length(1, 100)
                .no_injection()
                .build(),
        )
        .field(
            FieldBuilder::new("email", FieldType::Text)
                .pattern(EMAIL_PATTERN)
                .build(),
        )
        .field(
            FieldBuilder::new("phone", FieldType::Text)
                .length(10, 20)
                .pattern(PHONE_PATTERN)
                .build(),
        )
        .field(
            FieldBuilder::new("address", FieldType::Text)
                .length(5, 200)
                .no_injection()
                .build(),
        )
        .field(
            FieldBuilder::new("city", FieldType::Text)
                .length(2, 100)
                .no_injection()
                .build(),
        )
        .field(
            FieldBuilder::new("state", FieldType::Text)
                .length(2, 50)
                .no_injection()
                .build(),
        )
        .field(
            FieldBuilder::new("zip_code", FieldType::Text)
                .pattern(ZIP_PATTERN)
                .build(),
        )
        .field(
            FieldBuilder::new("country", FieldType::Text)
                .length(2, 100)
                .no_injection()
                .build(),
        )
        .field(
            FieldBuilder::new("tax_id", FieldType::Text)
                .length(5, 20)
                .build(),
        )
        .field(
            FieldBuilder::new("rating", FieldType::Float)
                .range(0.0, 5.0)
                .build(),
        )
        .field(
            FieldBuilder::new("total_sales", FieldType::Int)
                .constraint(Constraint::NonNegative)
                .build(),
        )
        .field(FieldBuilder::new("is_verified", FieldType::Bool).build())
        .field(FieldBuilder::new("joined_date", FieldType::Date).build())
        .build()
});

static PRODUCTS: Lazy<EntitySchema> = Lazy::new(|| {
    SchemaBuilder::new("products", "product_id")
        .field(
            FieldBuilder::new("product_id", FieldType::Text)
                .pattern(r"^P\d{6}$")
                .build(),
        )
        .field(
            FieldBuilder::new("name", FieldType::Text)
                .length(1, 200)
                .no_injection()
                .build(),
        )
        .field(
            FieldBuilder::new("description", FieldType::Text)
                .length(10, 1000)
                .no_injection()
                .build(),
        )
        .field(
            FieldBuilder::new("category", FieldType::Text)
                .length(2, 50)
                .no_injection()
                .build(),
        )
        .field(
            FieldBuilder::new("price", FieldType::Float)
                .constraint(Constraint::Positive)
                .build(),
        )
        .field(
            FieldBuilder::new("cost", FieldType::Float)
                .constraint(Constraint::NonNegative)
                .build(),
        )
        .field(
            FieldBuilder::new("stock_quantity", FieldType::Int)
                .constraint(Constraint::NonNegative)
                .build(),
        )
        .field(
            FieldBuilder::new("sku", FieldType::Text)
                .length(5, 50)
                .build(),
        )
        .field(
            FieldBuilder::new("brand", FieldType::Text)
                .length(1, 100)
                .no_injection()
                .build(),
        )
        // Weight arrives as a number or a numeric string depending on the
        // upstream generator; only numeric coercibility is required.
        .field(
            FieldBuilder::new("weight", FieldType::Any)
                .constraint(Constraint::Numeric)
                .build(),
        )
        .field(
            FieldBuilder::new("dimensions", FieldType::Text)
                .pattern(r"^\d+x\d+x\d+$")
                .build(),
        )
        .field(FieldBuilder::new("is_active", FieldType::Bool).build())
        .field(FieldBuilder::new("created_at", FieldType::Date).build())
        .rule(CrossFieldRule::StrictlyGreater {
            field: "price".to_string(),
            than: "cost".to_string(),
        })
        .build()
});

static SALES: Lazy<EntitySchema> = Lazy::new(|| {
    SchemaBuilder::new("sales", "sale_id")
        .field(
            FieldBuilder::new("sale_id", FieldType::Text)
                .pattern(r"^SALE\d{8}$")
                .build(),
        )
        .field(
            FieldBuilder::new("user_id", FieldType::Text)
                .pattern(r"^U\d{6}$")
                .build(),
        )
        .field(
            FieldBuilder::new("product_id", FieldType::Text)
                .pattern(r"^P\d{6}$")
                .build(),
        )
        .field(
            FieldBuilder::new("seller_id", FieldType::Text)
                .pattern(r"^S\d{4}$")
                .build(),
        )
        .field(
            FieldBuilder::new("quantity", FieldType::Int)
                .constraint(Constraint::Positive)
                .build(),
        )
        .field(
            FieldBuilder::new("unit_price", FieldType::Float)
                .constraint(Constraint::Positive)
                .build(),
        )
        .field(
            FieldBuilder::new("total_amount", FieldType::Float)
                .constraint(Constraint::NonNegative)
                .build(),
        )
        .field(
            FieldBuilder::new("discount", FieldType::Float)
                .range(0.0, 1.0)
                .build(),
        )
        .field(
            FieldBuilder::new("final_amount", FieldType::Float)
                .constraint(Constraint::NonNegative)
                .build(),
        )
        .field(FieldBuilder::new("sale_date", FieldType::Date).build())
        .field(
            FieldBuilder::new("status", FieldType::Text)
                .enum_of(["completed", "pending", "processing", "cancelled", "refunded"])
                .build(),
        )
        .field(
            FieldBuilder::new("shipping_address", FieldType::Text)
                .length(5, 200)
                .no_injection()
                .build(),
        )
        .field(
            FieldBuilder::new("shipping_city", FieldType::Text)
                .length(2, 100)
                .no_injection()
                .build(),
        )
        .field(
            FieldBuilder::new("shipping_state", FieldType::Text)
                .length(2, 50)
                .no_injection()
                .build(),
        )
        .field(
            FieldBuilder::new("shipping_zip", FieldType::Text)
                .pattern(ZIP_PATTERN)
                .build(),
        )
        .rule(CrossFieldRule::ProductEquals {
            target: "total_amount".to_string(),
            multiplicand: "quantity".to_string(),
            multiplier: "unit_price".to_string(),
            tolerance: AMOUNT_TOLERANCE,
        })
        .rule(CrossFieldRule::DiscountedEquals {
            target: "final_amount".to_string(),
            base: "total_amount".to_string(),
            discount: "discount".to_string(),
            tolerance: AMOUNT_TOLERANCE,
        })
        .build()
});

static PAYMENTS: Lazy<EntitySchema> = Lazy::new(|| {
    SchemaBuilder::new("payments", "payment_id")
        .field(
            FieldBuilder::new("payment_id", FieldType::Text)
                .pattern(r"^PAY\d{8}_\d+$")
                .build(),
        )
        .field(
            FieldBuilder::new("sale_id", FieldType::Text)
                .pattern(r"^SALE\d{8}$")
                .build(),
        )
        .field(
            FieldBuilder::new("amount", FieldType::Float)
                .constraint(Constraint::Positive)
                .build(),
        )
        .field(
            FieldBuilder::new("payment_method", FieldType::Text)
                .enum_of(["credit_card", "debit_card", "paypal", "cash", "check"])
                .build(),
        )
        .field(FieldBuilder::new("payment_date", FieldType::Date).build())
        .field(
            FieldBuilder::new("status", FieldType::Text)
                .enum_of(["completed", "pending", "failed", "refunded", "unpaid"])
                .build(),
        )
        .field(
            FieldBuilder::new("transaction_id", FieldType::Text)
                .length(5, 50)
                .no_injection()
                .build(),
        )
        .field(
            FieldBuilder::new("card_last_four", FieldType::Text)
                .optional()
                .pattern(r"^\d{4}$")
                .build(),
        )
        .build()
});

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_entity_from_str() {
        assert_eq!("users".parse::<Entity>().unwrap(), Entity::Users);
        assert_eq!("payments".parse::<Entity>().unwrap(), Entity::Payments);
    }

    #[test]
    fn test_unknown_entity_fails_fast() {
        let err = "orders".parse::<Entity>().unwrap_err();
        assert!(matches!(err, QualityError::UnknownEntity(ref name) if name == "orders"));
    }

    #[test]
    fn test_all_schemas_declare_their_primary_key() {
        for entity in Entity::ALL {
            let schema = entity.schema();
            assert_eq!(schema.name, entity.table_name());
            assert!(
                schema.field(&schema.primary_key).is_some(),
                "schema '{}' must declare its primary key field",
                schema.name
            );
        }
    }

    #[test]
    fn test_users_schema_shape() {
        let schema = Entity::Users.schema();
        assert_eq!(schema.fields.len(), 14);
        assert!(schema.rules.is_empty());

        let age = schema.field("age").unwrap();
        assert_eq!(age.field_type, FieldType::Int);
        assert!(matches!(
            age.constraints[0],
            Constraint::Range { min, max } if min == 0.0 && max == 120.0
        ));
    }

    #[test]
    fn test_products_schema_has_price_cost_rule() {
        let schema = Entity::Products.schema();
        assert_eq!(schema.rules.len(), 1);
        assert!(matches!(
            &schema.rules[0],
            CrossFieldRule::StrictlyGreater { field, than } if field == "price" && than == "cost"
        ));
    }

    #[test]
    fn test_sales_schema_has_amount_rules() {
        let schema = Entity::Sales.schema();
        assert_eq!(schema.rules.len(), 2);
        assert!(matches!(
            &schema.rules[0],
            CrossFieldRule::ProductEquals { tolerance, .. } if *tolerance == AMOUNT_TOLERANCE
        ));
        assert!(matches!(
            &schema.rules[1],
            CrossFieldRule::DiscountedEquals { tolerance, .. } if *tolerance == AMOUNT_TOLERANCE
        ));
    }

    #[test]
    fn test_payments_card_last_four_is_optional() {
        let schema = Entity::Payments.schema();
        let field = schema.field("card_last_four").unwrap();
        assert!(!field.required);
    }

    #[test]
    fn test_free_text_fields_carry_injection_denylist() {
        for (entity, field) in [
            (Entity::Users, "first_name"),
            (Entity::Sellers, "company_name"),
            (Entity::Products, "description"),
            (Entity::Sales, "shipping_address"),
            (Entity::Payments, "transaction_id"),
        ] {
            let def = entity.schema().field(field).unwrap();
            assert!(
                def.constraints
                    .iter()
                    .any(|c| matches!(c, Constraint::NoInjection)),
                "{entity} field '{field}' must reject injection"
            );
        }
    }
}
