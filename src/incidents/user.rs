//! User
//!
//! Account that created an incident or an event.

use crate::codec::reader::{fresh_fields, ReadResource, Reader};
use crate::codec::writer::ObjectWriter;
use crate::error::Result;
use crate::model::field_set::{FieldSet, HREF, ID, LINK};
use crate::model::{Resource, ResourceBuilder};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

const EMAIL: usize = 3;
const USERNAME: usize = 4;
const FIELDS: usize = 5;

/// Values of the 'user' type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    fields: FieldSet,
    id: String,
    href: String,
    email: String,
    username: String,
}

impl Resource for User {
    const KIND: &'static str = "User";
    const LINK_KIND: &'static str = "UserLink";
    const NIL_KIND: &'static str = "UserNil";
    const LIST_KIND: &'static str = "UserList";
    const LIST_LINK_KIND: &'static str = "UserListLink";
    const LIST_NIL_KIND: &'static str = "UserListNil";
    const FIELD_COUNT: usize = FIELDS;

    fn field_set(&self) -> &FieldSet {
        &self.fields
    }
}

impl User {
    pub fn id(&self) -> &str {
        self.get_id().unwrap_or_default()
    }

    pub fn get_id(&self) -> Option<&str> {
        self.fields.contains(ID).then_some(self.id.as_str())
    }

    pub fn href(&self) -> &str {
        self.get_href().unwrap_or_default()
    }

    pub fn get_href(&self) -> Option<&str> {
        self.fields.contains(HREF).then_some(self.href.as_str())
    }

    pub fn email(&self) -> &str {
        self.get_email().unwrap_or_default()
    }

    pub fn get_email(&self) -> Option<&str> {
        self.fields.contains(EMAIL).then_some(self.email.as_str())
    }

    pub fn username(&self) -> &str {
        self.get_username().unwrap_or_default()
    }

    pub fn get_username(&self) -> Option<&str> {
        self.fields.contains(USERNAME).then_some(self.username.as_str())
    }
}

/// Builder of [`User`] values
#[derive(Debug, Clone, Default)]
pub struct UserBuilder {
    fields: FieldSet,
    id: String,
    href: String,
    email: String,
    username: String,
}

impl UserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, value: impl Into<String>) -> Self {
        self.id = value.into();
        self.fields.insert(FIELDS, ID);
        self
    }

    pub fn href(mut self, value: impl Into<String>) -> Self {
        self.href = value.into();
        self.fields.insert(FIELDS, HREF);
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = value.into();
        self.fields.insert(FIELDS, EMAIL);
        self
    }

    pub fn username(mut self, value: impl Into<String>) -> Self {
        self.username = value.into();
        self.fields.insert(FIELDS, USERNAME);
        self
    }
}

impl ResourceBuilder for UserBuilder {
    type Output = User;

    fn link(mut self, value: bool) -> Self {
        self.fields.mark(FIELDS, LINK, value);
        self
    }

    fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn copy_from(mut self, object: Option<&User>) -> Self {
        let Some(object) = object else {
            return self;
        };
        self.fields = object.fields.clone();
        self.id = object.id.clone();
        self.href = object.href.clone();
        self.email = object.email.clone();
        self.username = object.username.clone();
        self
    }

    fn build(&self) -> Result<User> {
        Ok(User {
            fields: self.fields.clone(),
            id: self.id.clone(),
            href: self.href.clone(),
            email: self.email.clone(),
            username: self.username.clone(),
        })
    }
}

impl Serialize for User {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut writer = ObjectWriter::begin(serializer, self.kind())?;
        writer.field(self.fields.contains(ID), "id", &self.id)?;
        writer.field(self.fields.contains(HREF), "href", &self.href)?;
        writer.field(self.fields.contains(EMAIL), "email", &self.email)?;
        writer.field(self.fields.contains(USERNAME), "username", &self.username)?;
        writer.end()
    }
}

impl ReadResource for User {
    fn read_fields(reader: &mut Reader, object: &Map<String, Value>) -> Self {
        let mut value = User {
            fields: fresh_fields::<Self>(),
            ..Self::default()
        };
        for (name, field) in object {
            match name.as_str() {
                "kind" => {
                    let link = reader.read_kind(name, field, Self::LINK_KIND);
                    value.fields.mark(FIELDS, LINK, link);
                }
                "id" => value.fields.fill(ID, &mut value.id, reader.read_string(name, field)),
                "href" => value.fields.fill(HREF, &mut value.href, reader.read_string(name, field)),
                "email" => value.fields.fill(EMAIL, &mut value.email, reader.read_string(name, field)),
                "username" => {
                    value.fields.fill(USERNAME, &mut value.username, reader.read_string(name, field))
                }
                _ => reader.skip(name),
            }
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::unmarshal_str;

    #[test]
    fn test_read_user() {
        let user: User =
            unmarshal_str(r#"{"kind":"User","id":"u1","username":"jdoe","email":null}"#).unwrap();
        assert_eq!(user.username(), "jdoe");
        assert_eq!(user.get_email(), None);
        assert!(!user.is_link());
    }
}
