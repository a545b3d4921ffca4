use crate::runtime::data_structures::word::WordRef;
use std::{
    cell::RefCell,
    collections::HashMap,
    fmt::{self, Display, Formatter},
    rc::Rc,
};

/// A vector of values, shared by reference. Array literals (`{ 1 2 3 }`) and anything built
/// from them (`push`, `map`, `filter`, ...) hand this around rather than copying it.
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// A record's backing store, shared by reference. Keys are plain strings; a record is a flat
/// bag of fields, not a schema-checked struct.
pub type RecordRef = Rc<RefCell<HashMap<String, Value>>>;

/// Core value enumeration. Every datum that can sit on the data stack, be bound to a
/// variable, or appear as a literal inside a compiled body is one of these.
#[derive(Clone)]
pub enum Value {
    /// No value. Used as the default slot contents for a freshly-defined variable.
    None,

    /// A 64 bit signed integer.
    Int(i64),

    /// A 64 bit floating point number.
    Float(f64),

    /// A boolean, produced by the comparison and logic words.
    Bool(bool),

    /// An owned string.
    String(String),

    /// An array of values, shared by reference so `dup` on an array aliases rather than
    /// deep-copies it, matching how a shared compiled body can be referenced from more than
    /// one place.
    Array(ArrayRef),

    /// A flat string-keyed record, shared by reference for the same reason as `Array`.
    Record(RecordRef),

    /// A reference to a word object. This is how quotations (`[ ... ]`) are represented on
    /// the stack: an anonymous compiled word, pushed as data instead of being installed into
    /// a vocabulary and instead of being executed immediately.
    Word(WordRef),
}

impl Value {
    /// Forth-style truthiness: `0`, `0.0`, `false`, and `None` are false; everything else,
    /// including empty strings and empty arrays, is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Int(n) => *n != 0,
            Value::Float(n) => *n != 0.0,
            Value::Bool(b) => *b,
            Value::String(_) => true,
            Value::Array(_) => true,
            Value::Record(_) => true,
            Value::Word(_) => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Record(_) => "record",
            Value::Word(_) => "word",
        }
    }

    /// Walk this value for nested word references, collecting them into `out`. Arrays and
    /// records are walked recursively since they can hold captured quotations; any other
    /// host value is opaque as far as the reference graph is concerned.
    pub fn collect_word_refs(&self, out: &mut Vec<WordRef>) {
        match self {
            Value::Word(word) => out.push(word.clone()),
            Value::Array(array) => {
                for item in array.borrow().iter() {
                    item.collect_word_refs(out);
                }
            }
            Value::Record(record) => {
                for item in record.borrow().values() {
                    item.collect_word_refs(out);
                }
            }
            _ => {}
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Value::None => write!(f, "none"),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(array) => {
                write!(f, "{{ ")?;
                for item in array.borrow().iter() {
                    write!(f, "{} ", item)?;
                }
                write!(f, "}}")
            }
            Value::Record(record) => {
                write!(f, "{{ ")?;
                for (key, value) in record.borrow().iter() {
                    write!(f, "{}: {} ", key, value)?;
                }
                write!(f, "}}")
            }
            Value::Word(word) => match word.borrow().name.as_deref() {
                Some(name) => write!(f, "<word {}>", name),
                None => write!(f, "<quotation>"),
            },
        }
    }
}
