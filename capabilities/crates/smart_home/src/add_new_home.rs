// capabilities/crates/smart_home/src/add_new_home.rs

use mock_store_core::validate::require_text;
use mock_store_core::{
    apply_mutation, parse_args, record_from, FieldRules, RecordExt, Rule, Store, Tool, ToolContext,
    ToolError,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::lookup::{clean, user_by_email};
use crate::tables::{ADDRESSES, HOMES, HOME_USERS};

#[derive(Deserialize)]
struct AddHomeInput {
    home_name: Option<String>,
    owner_email: Option<String>,
    street: Option<String>,
    city: Option<String>,
    /// `12` or `"45B"`.
    #[serde(default)]
    house_number: Value,
    country: Option<String>,
    #[serde(default)]
    guest_mode_enabled: bool,
}

pub struct AddNewHome;

impl Tool for AddNewHome {
    fn name(&self) -> &'static str {
        "add_new_home"
    }

    fn description(&self) -> &'static str {
        "Create a home with its address. The owner must be an active user; they become the \
         home's admin. Home names are unique across the system."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "home_name": {"type": "string", "description": "Unique home name"},
                "owner_email": {"type": "string", "description": "E-mail of an active user"},
                "street": {"type": "string"},
                "city": {"type": "string"},
                "house_number": {"type": ["string", "number"]},
                "country": {"type": "string"},
                "guest_mode_enabled": {"type": "boolean", "description": "Defaults to false"}
            },
            "required": ["home_name", "owner_email", "street", "city"]
        })
    }

    fn invoke(&self, store: &mut Store, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: AddHomeInput = parse_args(args)?;

        let (owner_id, owner) = user_by_email(store, input.owner_email.as_deref(), "owner_email")?;
        let owner_email = owner.str_field("email").unwrap_or_default().to_lowercase();
        if !owner.has_status("active") {
            return Err(ToolError::referential(format!(
                "User with email '{}' is not active",
                owner_email
            )));
        }
        let home_name = require_text(input.home_name.as_deref(), "home_name")?.to_string();
        let street = require_text(input.street.as_deref(), "street")?.to_string();
        let city = require_text(input.city.as_deref(), "city")?.to_string();
        let house_number = match &input.house_number {
            Value::Number(n) => Some(n.as_f64().map_or_else(|| n.to_string(), |f| (f as i64).to_string())),
            Value::String(s) => clean(Some(s.as_str())),
            _ => None,
        };

        let home_rules = FieldRules::new().field("home_name", &[Rule::Unique]);
        home_rules.check(store, &HOMES, None, &record_from(json!({"home_name": &home_name})), true)?;

        let address = apply_mutation(
            store,
            ctx.clock(),
            &ADDRESSES,
            None,
            record_from(json!({
                "house_number": house_number,
                "street": street,
                "city": city,
                "country": clean(input.country.as_deref()),
            })),
            &FieldRules::new(),
        )?;
        let home = apply_mutation(
            store,
            ctx.clock(),
            &HOMES,
            None,
            record_from(json!({
                "owner_id": &owner_id,
                "home_name": &home_name,
                "address_id": address.get("address_id"),
                "guest_mode_enabled": input.guest_mode_enabled,
            })),
            &home_rules,
        )?;
        let membership = apply_mutation(
            store,
            ctx.clock(),
            &HOME_USERS,
            None,
            record_from(json!({
                "home_id": home.get("home_id"),
                "user_id": &owner_id,
                "role": "admin",
                "access_expires_at": null,
            })),
            &FieldRules::new(),
        )?;
        info!(home = home_name.as_str(), owner = owner_id.as_str(), "home created");

        Ok(json!({
            "message": format!("Home '{}' created for {}", home_name, owner_email),
            "home": {
                "home_id": home.get("home_id"),
                "home_name": &home_name,
                "owner_email": owner_email,
                "guest_mode_enabled": input.guest_mode_enabled,
                "created_at": home.get("created_at"),
                "updated_at": home.get("updated_at"),
            },
            "address": address,
            "membership": membership,
        }))
    }
}
