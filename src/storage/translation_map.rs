//! Flache Schlüssel/Wert-Map (JSON-Pointer-Pfade) für die Markup-Persistenz.
//!
//! Verschachteltes JSON wird zu Pfaden wie `/Markups/0/Thickness` abgeflacht;
//! Arrays werden über ihren Index adressiert.

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};
use std::fmt;

/// Typisierter Wert eines Map-Eintrags.
#[derive(Debug, Clone, PartialEq)]
pub enum MapValue {
    String(String),
    Int(i64),
    Double(f64),
}

impl MapValue {
    /// Wert als Text (Zahlen werden formatiert).
    pub fn to_text(&self) -> String {
        match self {
            MapValue::String(s) => s.clone(),
            MapValue::Int(i) => i.to_string(),
            MapValue::Double(d) => d.to_string(),
        }
    }

    /// Wert als Gleitkommazahl (nicht parsebarer Text ergibt 0.0).
    pub fn to_double(&self) -> f64 {
        match self {
            MapValue::String(s) => s.trim().parse().unwrap_or(0.0),
            MapValue::Int(i) => *i as f64,
            MapValue::Double(d) => *d,
        }
    }

    /// Wert als Ganzzahl (Text `"3"` ergibt 3, Gleitkomma wird abgeschnitten).
    pub fn to_int(&self) -> i64 {
        match self {
            MapValue::String(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<i64>()
                    .or_else(|_| trimmed.parse::<f64>().map(|d| d as i64))
                    .unwrap_or(0)
            }
            MapValue::Int(i) => *i,
            MapValue::Double(d) => *d as i64,
        }
    }

    /// Wert als Bool (alles ungleich 0 ist `true`).
    pub fn to_bool(&self) -> bool {
        self.to_int() != 0
    }

    fn to_json(&self) -> Value {
        match self {
            MapValue::String(s) => Value::String(s.clone()),
            MapValue::Int(i) => Value::Number(Number::from(*i)),
            MapValue::Double(d) => Number::from_f64(*d).map_or(Value::Null, Value::Number),
        }
    }
}

impl fmt::Display for MapValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for MapValue {
    fn from(value: &str) -> Self {
        MapValue::String(value.to_string())
    }
}

impl From<String> for MapValue {
    fn from(value: String) -> Self {
        MapValue::String(value)
    }
}

impl From<i64> for MapValue {
    fn from(value: i64) -> Self {
        MapValue::Int(value)
    }
}

impl From<bool> for MapValue {
    fn from(value: bool) -> Self {
        MapValue::Int(i64::from(value))
    }
}

impl From<f64> for MapValue {
    fn from(value: f64) -> Self {
        MapValue::Double(value)
    }
}

/// Geordnete Pfad→Wert-Map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationMap {
    entries: IndexMap<String, MapValue>,
}

impl TranslationMap {
    /// Erstellt eine leere Map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Setzt einen Wert (überschreibt vorhandene).
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MapValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Wert zu einem Pfad.
    pub fn get(&self, key: &str) -> Option<&MapValue> {
        self.entries.get(key)
    }

    /// Anzahl der Einträge.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Prüft, ob die Map leer ist.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iteriert in Einfüge-Reihenfolge über alle Einträge.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &MapValue)> {
        self.entries.iter()
    }

    /// Flacht ein JSON-Dokument zu Pfaden ab. `null` wird übersprungen.
    pub fn from_json(root: &Value) -> Self {
        let mut map = Self::new();
        flatten_into(root, String::new(), &mut map);
        map
    }

    /// Baut das verschachtelte JSON-Dokument wieder auf.
    ///
    /// Ein Knoten, dessen Kinder genau `0..n` heißen, wird zum Array.
    pub fn to_json(&self) -> Value {
        let mut root = Branch::default();
        for (key, value) in &self.entries {
            let segments: Vec<String> = key
                .split('/')
                .skip(1)
                .map(unescape_segment)
                .collect();
            if segments.is_empty() {
                continue;
            }
            root.insert(&segments, value.to_json());
        }
        root.into_json()
    }
}

fn flatten_into(value: &Value, prefix: String, map: &mut TranslationMap) {
    match value {
        Value::Null => {}
        Value::Bool(b) => map.insert(prefix, *b),
        Value::Number(number) => match number.as_i64() {
            Some(i) => map.insert(prefix, i),
            None => map.insert(prefix, number.as_f64().unwrap_or(0.0)),
        },
        Value::String(s) => map.insert(prefix, s.as_str()),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten_into(item, format!("{}/{}", prefix, i), map);
            }
        }
        Value::Object(fields) => {
            for (key, item) in fields {
                flatten_into(item, format!("{}/{}", prefix, escape_segment(key)), map);
            }
        }
    }
}

fn escape_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

fn unescape_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

/// Zwischenbaum beim Rückbau.
#[derive(Default)]
struct Branch {
    children: IndexMap<String, Tree>,
}

enum Tree {
    Leaf(Value),
    Branch(Branch),
}

impl Branch {
    fn insert(&mut self, segments: &[String], value: Value) {
        let Some((head, rest)) = segments.split_first() else {
            return;
        };
        if rest.is_empty() {
            self.children.insert(head.clone(), Tree::Leaf(value));
            return;
        }
        let child = self
            .children
            .entry(head.clone())
            .or_insert_with(|| Tree::Branch(Branch::default()));
        if let Tree::Leaf(_) = child {
            log::warn!("Translation-Map: Pfad '{}' ist Wert und Knoten zugleich", head);
            *child = Tree::Branch(Branch::default());
        }
        if let Tree::Branch(branch) = child {
            branch.insert(rest, value);
        }
    }

    fn is_array(&self) -> bool {
        !self.children.is_empty()
            && self
                .children
                .keys()
                .enumerate()
                .all(|(i, key)| key.parse::<usize>() == Ok(i))
    }

    fn into_json(self) -> Value {
        let is_array = self.is_array();
        let values = self.children.into_iter().map(|(key, child)| {
            let value = match child {
                Tree::Leaf(value) => value,
                Tree::Branch(branch) => branch.into_json(),
            };
            (key, value)
        });
        if is_array {
            Value::Array(values.map(|(_, value)| value).collect())
        } else {
            Value::Object(values.collect::<Map<String, Value>>())
        }
    }
}
