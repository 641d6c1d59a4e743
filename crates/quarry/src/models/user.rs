use crate::{stmt::Value, Model, Record};

use jiff::Timestamp;

#[derive(Debug)]
pub struct User;

impl Model for User {
    const ENTITY_TYPE: &'static str = "user";
    const PRIMARY_KEY: &'static str = "uid";

    fn defaults(record: &mut Record) {
        record.set(Self::PRIMARY_KEY, Value::Null);
        record.set("name", "");
        record.set("pass", "");
        record.set("mail", "");
        record.set("theme", "");
        record.set("signature", "");
        record.set("signature_format", Value::Null);
        record.set("created", Timestamp::now().as_second());
        record.set("access", "0");
        record.set("login", "0");
        record.set("timezone", Value::Null);
        record.set("language", "");
        record.set("picture", Value::Null);
        record.set("init", "");
        record.set("data", false);
        record.set("roles", vec!["anonymous user"]);
    }
}
