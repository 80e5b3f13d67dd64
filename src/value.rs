//! The describable value model.
//!
//! Rust has no runtime reflection, so values opt in explicitly:
//! - [`Model`] for structured records (ordered, typed fields + a JSON schema),
//! - [`Object`] for anything else, with optional capabilities
//!   ([`Object::as_describe`], [`Object::attributes`]),
//! - [`Inspect`] / [`Typed`] to lift ordinary Rust values and types.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::ir::TypeDesc;
use crate::tree::Node;

// ------------------------------- Values ---------------------------------- //

#[derive(Clone)]
pub enum Value {
    Record(Record),
    Map(IndexMap<String, Value>),
    Type(String),            // a type used as a value
    Str(String),
    Int(i64),
    Float(OrderedFloat<f64>),
    Bool(bool),
    None,
    Object(Rc<dyn Object>),
}

#[derive(Debug, Clone)]
pub struct Record {
    pub name: String,
    pub fields: Vec<Field>,  // declaration order
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: TypeDesc,        // declared (outer) type
    pub value: Value,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeDesc, value: Value) -> Self {
        Self { name: name.into(), ty, value }
    }

    /// Field whose declared type comes from the Rust type itself.
    pub fn of<T: Typed + Inspect>(name: impl Into<String>, value: &T) -> Self {
        Self::new(name, T::type_desc(), value.inspect())
    }
}

impl Value {
    pub fn float(f: f64) -> Self {
        Value::Float(OrderedFloat(f))
    }

    pub fn object(obj: impl Object + 'static) -> Self {
        Value::Object(Rc::new(obj))
    }

    /// Runtime type name, as shown next to map entries and attributes.
    pub fn type_name(&self) -> String {
        match self {
            Value::Record(r) => r.name.clone(),
            Value::Map(_) => "dict".into(),
            Value::Type(_) => "type".into(),
            Value::Str(_) => "str".into(),
            Value::Int(_) => "int".into(),
            Value::Float(_) => "float".into(),
            Value::Bool(_) => "bool".into(),
            Value::None => "NoneType".into(),
            Value::Object(obj) => obj.class_name(),
        }
    }

    /// Literal form of the value.
    pub fn repr(&self) -> String {
        match self {
            Value::Str(s) => format!("{s:?}"),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => float_repr(f.0),
            Value::Bool(true) => "True".into(),
            Value::Bool(false) => "False".into(),
            Value::None => "None".into(),
            Value::Type(name) => format!("<type {name}>"),
            Value::Map(entries) => {
                let items: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{k:?}: {}", v.repr()))
                    .collect();
                format!("{{{}}}", items.join(", "))
            }
            Value::Record(r) => {
                let items: Vec<String> = r
                    .fields
                    .iter()
                    .map(|f| format!("{}={}", f.name, f.value.repr()))
                    .collect();
                format!("{}({})", r.name, items.join(", "))
            }
            Value::Object(obj) => obj.to_string(),
        }
    }
}

/// Shortest round-trip digits; positional between 1e-4 and 1e16, otherwise
/// `d.ddde±XX`. Always shows a fractional part or an exponent.
fn float_repr(f: f64) -> String {
    if f.is_nan() {
        return "nan".into();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf".into() } else { "-inf".into() };
    }
    let sci = format!("{f:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    if f == 0.0 || (-4..16).contains(&exp) {
        let mut s = f.to_string();
        if !s.contains('.') {
            s.push_str(".0");
        }
        return s;
    }
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.abs())
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Record(r) => f.debug_tuple("Record").field(r).finish(),
            Value::Map(m) => f.debug_tuple("Map").field(m).finish(),
            Value::Object(obj) => write!(f, "Object({}: {obj})", obj.class_name()),
            scalar => write!(f, "{}", scalar.repr()),
        }
    }
}

// ---------------------------- Capabilities ------------------------------- //

/// Self-rendering: populate the node that describes this value.
pub trait Describe {
    fn describe(&self, node: &mut Node);
}

/// A generic instance. `Display` is its string form, used when neither
/// capability is available.
pub trait Object: fmt::Display {
    fn class_name(&self) -> String;

    fn as_describe(&self) -> Option<&dyn Describe> {
        None
    }

    /// Public state as `(name, value)` pairs; `None` when not enumerable.
    fn attributes(&self) -> Option<Vec<(String, Value)>> {
        None
    }
}

/// Stock [`Object`]: a class name plus either attributes or a string form.
#[derive(Debug, Clone)]
pub struct Instance {
    pub class: String,
    pub attrs: Option<IndexMap<String, Value>>,
    pub text: String,
}

impl Instance {
    pub fn opaque(class: impl Into<String>, text: impl Into<String>) -> Self {
        Self { class: class.into(), attrs: None, text: text.into() }
    }

    pub fn with_attributes<K, I>(class: impl Into<String>, attrs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let class = class.into();
        let attrs: IndexMap<String, Value> =
            attrs.into_iter().map(|(k, v)| (k.into(), v)).collect();
        let text = format!("<{class} object>");
        Self { class, attrs: Some(attrs), text }
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Object for Instance {
    fn class_name(&self) -> String {
        self.class.clone()
    }

    fn attributes(&self) -> Option<Vec<(String, Value)>> {
        self.attrs
            .as_ref()
            .map(|attrs| attrs.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }
}

// ------------------------------- Models ---------------------------------- //

/// A structured record: declared fields in order, plus the record's schema.
pub trait Model {
    const NAME: &'static str;

    fn schema() -> serde_json::Value;

    fn fields(&self) -> Vec<Field>;

    fn record(&self) -> Record {
        Record { name: Self::NAME.to_string(), fields: self.fields() }
    }
}

// --------------------------- Rust → Value -------------------------------- //

pub trait Inspect {
    fn inspect(&self) -> Value;
}

/// Declared type of a Rust type, for record field labels.
pub trait Typed {
    fn type_desc() -> TypeDesc;
}

impl Inspect for Value {
    fn inspect(&self) -> Value {
        self.clone()
    }
}

impl Inspect for bool {
    fn inspect(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Inspect for String {
    fn inspect(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl Inspect for &str {
    fn inspect(&self) -> Value {
        Value::Str((*self).to_string())
    }
}

macro_rules! scalar_impls {
    ($variant:ident, $repr:ty, $name:literal => $($t:ty),+) => {$(
        impl Inspect for $t {
            fn inspect(&self) -> Value {
                Value::$variant(<$repr>::from(*self).into())
            }
        }
        impl Typed for $t {
            fn type_desc() -> TypeDesc {
                TypeDesc::primitive($name)
            }
        }
    )+};
}

scalar_impls!(Int, i64, "int" => i8, i16, i32, i64, u8, u16, u32);
scalar_impls!(Float, f64, "float" => f32, f64);

impl Inspect for u64 {
    fn inspect(&self) -> Value {
        // out-of-range counts fall back to their float value
        i64::try_from(*self).map(Value::Int).unwrap_or(Value::float(*self as f64))
    }
}

impl Inspect for usize {
    fn inspect(&self) -> Value {
        (*self as u64).inspect()
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn inspect(&self) -> Value {
        match self {
            Some(v) => v.inspect(),
            None => Value::None,
        }
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn inspect(&self) -> Value {
        let items: Vec<String> = self.iter().map(|v| v.inspect().repr()).collect();
        Value::object(Instance::opaque("list", format!("[{}]", items.join(", "))))
    }
}

impl<T: Inspect> Inspect for IndexMap<String, T> {
    fn inspect(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.clone(), v.inspect())).collect())
    }
}

impl<T: Inspect> Inspect for BTreeMap<String, T> {
    fn inspect(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.clone(), v.inspect())).collect())
    }
}

impl Inspect for serde_json::Value {
    fn inspect(&self) -> Value {
        crate::infer::value_from_json(self)
    }
}

impl Typed for bool {
    fn type_desc() -> TypeDesc {
        TypeDesc::primitive("bool")
    }
}

impl Typed for u64 {
    fn type_desc() -> TypeDesc {
        TypeDesc::primitive("int")
    }
}

impl Typed for usize {
    fn type_desc() -> TypeDesc {
        TypeDesc::primitive("int")
    }
}

impl Typed for String {
    fn type_desc() -> TypeDesc {
        TypeDesc::primitive("str")
    }
}

impl Typed for &str {
    fn type_desc() -> TypeDesc {
        TypeDesc::primitive("str")
    }
}

impl<T: Typed> Typed for Option<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::parametric("Optional", vec![T::type_desc()])
    }
}

impl<T: Typed> Typed for Vec<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::parametric("List", vec![T::type_desc()])
    }
}

impl<T: Typed> Typed for IndexMap<String, T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::parametric("Dict", vec![String::type_desc(), T::type_desc()])
    }
}

impl<T: Typed> Typed for BTreeMap<String, T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::parametric("Dict", vec![String::type_desc(), T::type_desc()])
    }
}

impl<A: Typed, B: Typed> Typed for (A, B) {
    fn type_desc() -> TypeDesc {
        TypeDesc::parametric("Tuple", vec![A::type_desc(), B::type_desc()])
    }
}

impl Typed for serde_json::Value {
    fn type_desc() -> TypeDesc {
        TypeDesc::primitive("Any")
    }
}

// ------------------------------- Tests ------------------------------------ //
