use std::{fmt, str::FromStr};

use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub country: String,
}

/// A persisted student. The store-assigned id lives outside this struct.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub age: i64,
    pub address: Address,
}

/// Read view returned by the list operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedStudent {
    pub name: String,
    pub age: i64,
}

impl From<&Student> for SimplifiedStudent {
    fn from(s: &Student) -> Self {
        Self { name: s.name.clone(), age: s.age }
    }
}

/// Opaque identifier. Wraps the store-native ObjectId; callers only ever see the hex string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StudentId(ObjectId);

impl StudentId {
    pub fn generate() -> Self { Self(ObjectId::new()) }

    pub fn parse(s: &str) -> Result<Self, ModelError> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| ModelError::InvalidId(s.to_string()))
    }

    pub fn object_id(&self) -> ObjectId { self.0 }

    /// Filter document selecting exactly this record.
    pub fn filter(&self) -> Document {
        doc! { "_id": self.0 }
    }
}

impl From<ObjectId> for StudentId {
    fn from(oid: ObjectId) -> Self { Self(oid) }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl FromStr for StudentId {
    type Err = ModelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewAddress {
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Create payload as received on the wire. Every field is required; `validate` enforces it.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewStudent {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub address: Option<NewAddress>,
}

impl NewStudent {
    /// Check required-field presence and produce a complete `Student`.
    /// All missing fields are reported at once.
    pub fn validate(self) -> Result<Student, ModelError> {
        let mut missing = Vec::new();
        if self.name.is_none() { missing.push("name"); }
        if self.age.is_none() { missing.push("age"); }
        match &self.address {
            None => missing.push("address"),
            Some(a) => {
                if a.city.is_none() { missing.push("address.city"); }
                if a.country.is_none() { missing.push("address.country"); }
            }
        }
        if !missing.is_empty() {
            return Err(ModelError::Validation(format!("missing required field(s): {}", missing.join(", "))));
        }

        match (self.name, self.age, self.address) {
            (Some(name), Some(age), Some(NewAddress { city: Some(city), country: Some(country) })) => {
                Ok(Student { name, age, address: Address { city, country } })
            }
            _ => Err(ModelError::Validation("incomplete student".into())),
        }
    }
}

/// Partial update: only present fields are written, the rest keep their stored value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.address.is_none()
    }

    /// Body of a `$set` operator holding only the submitted fields.
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(name) = &self.name {
            set.insert("name", name.clone());
        }
        if let Some(age) = self.age {
            set.insert("age", age);
        }
        if let Some(addr) = &self.address {
            set.insert("address", doc! { "city": addr.city.clone(), "country": addr.country.clone() });
        }
        set
    }

    /// Merge into `student`; returns whether any stored value actually changed.
    pub fn apply(&self, student: &mut Student) -> bool {
        let mut modified = false;
        if let Some(name) = &self.name {
            if &student.name != name {
                student.name = name.clone();
                modified = true;
            }
        }
        if let Some(age) = self.age {
            if student.age != age {
                student.age = age;
                modified = true;
            }
        }
        if let Some(addr) = &self.address {
            if &student.address != addr {
                student.address = addr.clone();
                modified = true;
            }
        }
        modified
    }
}

/// Optional list criteria. An absent key means no constraint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentFilter {
    /// Exact, case-sensitive match on `address.country`.
    pub country: Option<String>,
    /// Inclusive lower bound on `age`.
    pub min_age: Option<i64>,
}

impl StudentFilter {
    /// An empty country string is treated as "not given".
    pub fn from_query(country: Option<String>, age: Option<i64>) -> Self {
        Self {
            country: country.filter(|c| !c.is_empty()),
            min_age: age,
        }
    }

    pub fn to_document(&self) -> Document {
        let mut filter = Document::new();
        if let Some(country) = &self.country {
            filter.insert("address.country", country.clone());
        }
        if let Some(min_age) = self.min_age {
            filter.insert("age", doc! { "$gte": min_age });
        }
        filter
    }

    pub fn matches(&self, student: &Student) -> bool {
        let country_ok = self.country.as_ref().map_or(true, |c| &student.address.country == c);
        let age_ok = self.min_age.map_or(true, |min| student.age >= min);
        country_ok && age_ok
    }
}
