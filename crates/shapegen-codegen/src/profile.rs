//! Backend profiles
//!
//! A [`BackendProfile`] is the per-language table the generic engine reads:
//! type spellings, wire access templates, statement syntax and the text of
//! generated client helpers. Templates use `{name}` placeholders filled by
//! [`fill`].

use crate::ir::{EntryPoint, NameCase, WireKind};
use shapegen_core::{Backend, ShapeType};

/// How statement blocks are delimited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStyle {
    /// `header {` ... `}`
    Braces,
    /// `header`, then `{` on its own line
    Allman,
    /// `header:` plus indentation; empty bodies need `pass`
    Indent,
}

/// Native spelling of a scalar, with a boxed form for generic arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scalar {
    pub name: &'static str,
    pub boxed: Option<&'static str>,
}

const fn scalar(name: &'static str) -> Option<Scalar> {
    Some(Scalar { name, boxed: None })
}

const fn boxed(name: &'static str, boxed: &'static str) -> Option<Scalar> {
    Some(Scalar {
        name,
        boxed: Some(boxed),
    })
}

/// Text of generated client-side helpers
#[derive(Debug)]
pub struct ClientTemplates {
    /// Blocking variants exist only where the language can block on a future
    pub has_sync: bool,
    pub async_suffix: &'static str,
    pub method_case: NameCase,
    pub async_return: &'static str,
    pub handler_param: &'static str,
    pub executor_param: &'static str,
    pub connection: &'static str,
    /// Qualifier for model types referenced from the client unit
    pub model_prefix: &'static str,
    pub invoke: &'static str,
    pub unwrap: &'static str,
    /// Name of the function that wraps a handler for executor redispatch
    pub marshal: &'static str,
    /// Method header; `{name}`, `{params}`, `{ret}`
    pub method_header: &'static str,
    pub param: &'static str,
    /// Fault-aware blocking helper; `{error}`
    pub unwrap_helper: &'static str,
    /// Handler interface; `{handler}`, `{event}`
    pub handler_decl: &'static str,
    /// Executor-marshalling decorator for one handler; `{handler}`, `{event}`, `{marshal}`
    pub marshal_decorator: &'static str,
}

/// Per-language configuration consumed by the type mapper, emitter and renderer
#[derive(Debug)]
pub struct BackendProfile {
    pub backend: Backend,
    pub display_name: &'static str,
    pub file_extension: &'static str,
    pub block: BlockStyle,
    pub indent: &'static str,
    /// Appended to simple statements
    pub terminator: &'static str,
    pub line_comment: &'static str,
    pub field_case: NameCase,
    pub variable_case: NameCase,
    /// Identifiers a field may not use verbatim; escaped with a trailing `_`
    pub reserved: &'static [&'static str],

    // Types
    pub scalars: fn(ShapeType) -> Option<Scalar>,
    pub list_type: &'static str,
    pub set_type: Option<&'static str>,
    pub map_type: &'static str,
    pub optional_type: &'static str,
    /// Enum members are typed as plain strings
    pub enum_as_string: bool,
    pub wire_type: fn(WireKind) -> &'static str,
    /// Lists and maps already are wire values, so identity element loops can be dropped
    pub native_wire_containers: bool,

    // Expressions
    pub this_name: &'static str,
    pub payload_name: &'static str,
    pub null: &'static str,
    pub field_get: &'static str,
    pub field_set: &'static str,
    pub unwrap_optional: &'static str,
    pub present: &'static str,
    pub absent: &'static str,
    pub wire_field: &'static str,
    pub wire_has: &'static str,
    pub wire_set: fn(WireKind) -> &'static str,
    pub wire_as: fn(WireKind) -> &'static str,
    pub wire_wrap: fn(WireKind) -> &'static str,
    pub widen: fn(ShapeType) -> Option<&'static str>,
    pub narrow: fn(ShapeType) -> Option<&'static str>,
    pub mismatch: fn(ShapeType) -> Option<&'static str>,
    pub base64_encode: &'static str,
    pub base64_decode: &'static str,
    pub timestamp_to_epoch: &'static str,
    pub epoch_to_timestamp: &'static str,
    pub enum_to_wire: &'static str,
    pub enum_from_wire: &'static str,
    pub not_empty_text: &'static str,
    pub not_empty_bytes: &'static str,
    pub new_wire_object: &'static str,
    pub new_wire_array: &'static str,
    pub new_list: &'static str,
    pub new_set: &'static str,
    pub new_map: &'static str,
    pub new_instance: &'static str,
    pub empty_blob: &'static str,
    pub this_call: &'static str,

    // Statements
    pub declare: &'static str,
    pub assign: &'static str,
    pub append_list: &'static str,
    pub append_set: &'static str,
    pub insert: &'static str,
    pub for_each: &'static str,
    pub for_entries: &'static str,
    pub entry_bindings: &'static [&'static str],
    pub entries_typed: &'static str,
    pub entries_wire: &'static str,
    pub if_header: &'static str,
    pub fail: &'static str,

    // Entry points
    pub entry_call: fn(EntryPoint) -> &'static str,
    pub entry_ref: fn(EntryPoint) -> &'static str,
    pub entry_header: fn(EntryPoint) -> &'static str,

    pub client: ClientTemplates,
}

impl BackendProfile {
    pub fn for_backend(backend: Backend) -> &'static BackendProfile {
        match backend {
            Backend::Cpp => &CPP,
            Backend::Python => &PYTHON,
            Backend::Javascript => &TYPESCRIPT,
            Backend::Java => &JAVA,
        }
    }

    /// Field name for a member: the profile's case, then keyword escaping
    ///
    /// ```
    /// use shapegen_codegen::profile::{JAVA, PYTHON};
    ///
    /// assert_eq!(PYTHON.field_name("from"), "from_");
    /// assert_eq!(PYTHON.field_name("cityId"), "city_id");
    /// assert_eq!(JAVA.field_name("default"), "default_");
    /// ```
    pub fn field_name(&self, member: &str) -> String {
        let name = self.field_case.apply(member);
        if self.reserved.contains(&name.as_str()) {
            format!("{}_", name)
        } else {
            name
        }
    }
}

/// Replace each `{key}` in `template` with its value
///
/// ```
/// use shapegen_codegen::profile::fill;
///
/// assert_eq!(fill("{obj}.get({key})", &[("obj", "o"), ("key", "\"k\"")]), "o.get(\"k\")");
/// ```
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in values {
        out = out.replace(&format!("{{{}}}", key), value);
    }
    out
}

// ============================================================================
// C++
// ============================================================================

fn cpp_scalars(ty: ShapeType) -> Option<Scalar> {
    match ty {
        ShapeType::Boolean => scalar("bool"),
        ShapeType::Byte => scalar("int8_t"),
        ShapeType::Short => scalar("int16_t"),
        ShapeType::Integer => scalar("int32_t"),
        ShapeType::Long | ShapeType::BigInteger => scalar("int64_t"),
        ShapeType::Float => scalar("float"),
        ShapeType::Double => scalar("double"),
        ShapeType::String | ShapeType::Enum => scalar("Aws::Crt::String"),
        ShapeType::Timestamp => scalar("Aws::Crt::DateTime"),
        ShapeType::Blob => scalar("Aws::Crt::Vector<uint8_t>"),
        ShapeType::Document => scalar("Aws::Crt::JsonObject"),
        _ => None,
    }
}

fn cpp_wire_type(kind: WireKind) -> &'static str {
    match kind {
        WireKind::Bool => "bool",
        WireKind::Int => "int32_t",
        WireKind::Int64 => "int64_t",
        WireKind::Double => "double",
        WireKind::String => "Aws::Crt::String",
        WireKind::Object | WireKind::Document => "Aws::Crt::JsonObject",
        WireKind::Array => "Aws::Crt::Vector<Aws::Crt::JsonObject>",
    }
}

fn cpp_wire_set(kind: WireKind) -> &'static str {
    match kind {
        WireKind::Bool => "{obj}.WithBool({key}, {v})",
        WireKind::Int => "{obj}.WithInteger({key}, {v})",
        WireKind::Int64 => "{obj}.WithInt64({key}, {v})",
        WireKind::Double => "{obj}.WithDouble({key}, {v})",
        WireKind::String => "{obj}.WithString({key}, {v})",
        WireKind::Object | WireKind::Document => "{obj}.WithObject({key}, {v})",
        WireKind::Array => "{obj}.WithArray({key}, {v})",
    }
}

fn cpp_wire_as(kind: WireKind) -> &'static str {
    match kind {
        WireKind::Bool => "{v}.AsBool()",
        WireKind::Int => "{v}.AsInteger()",
        WireKind::Int64 => "{v}.AsInt64()",
        WireKind::Double => "{v}.AsDouble()",
        WireKind::String => "{v}.AsString()",
        WireKind::Object => "{v}.AsObject()",
        WireKind::Array => "{v}.AsArray()",
        WireKind::Document => "{v}.Materialize()",
    }
}

fn cpp_wire_wrap(kind: WireKind) -> &'static str {
    match kind {
        WireKind::Bool => "Aws::Crt::JsonObject().AsBool({v})",
        WireKind::Int => "Aws::Crt::JsonObject().AsInteger({v})",
        WireKind::Int64 => "Aws::Crt::JsonObject().AsInt64({v})",
        WireKind::Double => "Aws::Crt::JsonObject().AsDouble({v})",
        WireKind::String => "Aws::Crt::JsonObject().AsString({v})",
        WireKind::Array => "Aws::Crt::JsonObject().AsArray({v})",
        WireKind::Object | WireKind::Document => "{v}",
    }
}

fn cpp_widen(ty: ShapeType) -> Option<&'static str> {
    match ty {
        ShapeType::Byte | ShapeType::Short => Some("static_cast<int32_t>({v})"),
        ShapeType::Float => Some("static_cast<double>({v})"),
        _ => None,
    }
}

fn cpp_narrow(ty: ShapeType) -> Option<&'static str> {
    match ty {
        ShapeType::Byte => Some("static_cast<int8_t>({v})"),
        ShapeType::Short => Some("static_cast<int16_t>({v})"),
        ShapeType::Float => Some("static_cast<float>({v})"),
        _ => None,
    }
}

fn no_mismatch(_: ShapeType) -> Option<&'static str> {
    None
}

fn cpp_entry_call(point: EntryPoint) -> &'static str {
    match point {
        EntryPoint::ToWire => "{prefix}{type}::s_toWire({v})",
        EntryPoint::FromWire => "{prefix}{type}::s_fromWire({v})",
        EntryPoint::Validate => "{prefix}{type}::s_validate({v})",
    }
}

fn cpp_entry_ref(point: EntryPoint) -> &'static str {
    match point {
        EntryPoint::ToWire => "&{prefix}{type}::s_toWire",
        EntryPoint::FromWire => "&{prefix}{type}::s_fromWire",
        EntryPoint::Validate => "&{prefix}{type}::s_validate",
    }
}

fn cpp_entry_header(point: EntryPoint) -> &'static str {
    match point {
        EntryPoint::ToWire => "Aws::Crt::JsonObject {type}::s_toWire(const {type} &value)",
        EntryPoint::FromWire => "{type} {type}::s_fromWire(const Aws::Crt::JsonView &payload)",
        EntryPoint::Validate => "void {type}::s_validate(const {type} &value)",
    }
}

const CPP_RESERVED: &[&str] = &[
    "alignas", "alignof", "and", "asm", "auto", "bool", "break", "case", "catch", "char",
    "class", "const", "constexpr", "continue", "default", "delete", "do", "double", "else",
    "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto", "if",
    "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "nullptr",
    "operator", "or", "private", "protected", "public", "register", "return", "short",
    "signed", "sizeof", "static", "struct", "switch", "template", "this", "throw", "true",
    "try", "typedef", "typename", "union", "unsigned", "using", "virtual", "void",
    "volatile", "while", "xor",
];

pub static CPP: BackendProfile = BackendProfile {
    backend: Backend::Cpp,
    display_name: "C++",
    file_extension: "cpp",
    block: BlockStyle::Allman,
    indent: "    ",
    terminator: ";",
    line_comment: "//",
    field_case: NameCase::Camel,
    variable_case: NameCase::Camel,
    reserved: CPP_RESERVED,

    scalars: cpp_scalars,
    list_type: "Aws::Crt::Vector<{t}>",
    set_type: None,
    map_type: "Aws::Crt::Map<Aws::Crt::String, {t}>",
    optional_type: "Aws::Crt::Optional<{t}>",
    enum_as_string: false,
    wire_type: cpp_wire_type,
    native_wire_containers: false,

    this_name: "value",
    payload_name: "payload",
    null: "nullptr",
    field_get: "{obj}.m_{field}",
    field_set: "{obj}.m_{field} = {v}",
    unwrap_optional: "{v}.value()",
    present: "{v}.has_value()",
    absent: "!{v}.has_value()",
    wire_field: "{obj}.GetJsonObject({key})",
    wire_has: "{obj}.ValueExists({key})",
    wire_set: cpp_wire_set,
    wire_as: cpp_wire_as,
    wire_wrap: cpp_wire_wrap,
    widen: cpp_widen,
    narrow: cpp_narrow,
    mismatch: no_mismatch,
    base64_encode: "Aws::Crt::Base64Encode({v})",
    base64_decode: "Aws::Crt::Base64Decode({v})",
    timestamp_to_epoch: "{v}.SecondsWithMSPrecision()",
    epoch_to_timestamp: "Aws::Crt::DateTime({v})",
    enum_to_wire: "{type}ToString({v})",
    enum_from_wire: "{type}FromString({v})",
    not_empty_text: "!{v}.empty()",
    not_empty_bytes: "!{v}.empty()",
    new_wire_object: "Aws::Crt::JsonObject()",
    new_wire_array: "Aws::Crt::Vector<Aws::Crt::JsonObject>()",
    new_list: "{type}()",
    new_set: "{type}()",
    new_map: "{type}()",
    new_instance: "{type}()",
    empty_blob: "Aws::Crt::Vector<uint8_t>()",
    this_call: "{method}({args})",

    declare: "{ty} {name} = {v}",
    assign: "{name} = {v}",
    append_list: "{c}.push_back({v})",
    append_set: "{c}.insert({v})",
    insert: "{c}[{key}] = {v}",
    for_each: "for (const auto &{item} : {source})",
    for_entries: "for (const auto &{entry} : {source})",
    entry_bindings: &[
        "const auto &{key} = {entry}.first;",
        "const auto &{value} = {entry}.second;",
    ],
    entries_typed: "{v}",
    entries_wire: "{v}.GetAllObjects()",
    if_header: "if ({cond})",
    fail: "throw std::invalid_argument({msg})",

    entry_call: cpp_entry_call,
    entry_ref: cpp_entry_ref,
    entry_header: cpp_entry_header,

    client: ClientTemplates {
        has_sync: true,
        async_suffix: "Async",
        method_case: NameCase::Pascal,
        async_return: "std::future<{t}>",
        handler_param: "std::shared_ptr<{handler}>",
        executor_param: "Executor",
        connection: "m_connection",
        model_prefix: "",
        invoke: "Invoke",
        unwrap: "Unwrap",
        marshal: "Marshal{handler}",
        method_header: "{ret} {name}({params})",
        param: "{ty} {name}",
        unwrap_helper: r#"template <typename T> static T Unwrap(std::future<T> &&future)
{
    try
    {
        return future.get();
    }
    catch (const {error} &)
    {
        throw;
    }
    catch (...)
    {
        std::throw_with_nested(std::runtime_error("operation failed"));
    }
}"#,
        handler_decl: r#"class {handler}
{
  public:
    virtual ~{handler}() = default;
    virtual void OnStreamEvent({event} &&event) = 0;
    virtual void OnStreamError(std::exception_ptr error) = 0;
    virtual void OnStreamClosed() = 0;
};"#,
        marshal_decorator: r#"class {handler}OnExecutor : public {handler}
{
  public:
    {handler}OnExecutor(std::shared_ptr<{handler}> delegate, Executor executor)
        : m_delegate(std::move(delegate)), m_executor(std::move(executor))
    {
    }

    void OnStreamEvent({event} &&event) override
    {
        auto delegate = m_delegate;
        m_executor([delegate, event]() mutable { delegate->OnStreamEvent(std::move(event)); });
    }

    void OnStreamError(std::exception_ptr error) override
    {
        auto delegate = m_delegate;
        m_executor([delegate, error]() { delegate->OnStreamError(error); });
    }

    void OnStreamClosed() override
    {
        auto delegate = m_delegate;
        m_executor([delegate]() { delegate->OnStreamClosed(); });
    }

  private:
    std::shared_ptr<{handler}> m_delegate;
    Executor m_executor;
};

static std::shared_ptr<{handler}> {marshal}(std::shared_ptr<{handler}> handler, Executor executor)
{
    if (!handler || !executor)
    {
        return handler;
    }
    return std::make_shared<{handler}OnExecutor>(std::move(handler), std::move(executor));
}"#,
    },
};

// ============================================================================
// Python
// ============================================================================

fn python_scalars(ty: ShapeType) -> Option<Scalar> {
    match ty {
        ShapeType::Boolean => scalar("bool"),
        ShapeType::Byte
        | ShapeType::Short
        | ShapeType::Integer
        | ShapeType::Long
        | ShapeType::BigInteger => scalar("int"),
        ShapeType::Float | ShapeType::Double => scalar("float"),
        ShapeType::String | ShapeType::Enum => scalar("str"),
        ShapeType::Timestamp => scalar("datetime.datetime"),
        ShapeType::Blob => scalar("bytes"),
        ShapeType::Document => scalar("typing.Dict[str, typing.Any]"),
        _ => None,
    }
}

fn untyped_wire(_: WireKind) -> &'static str {
    ""
}

fn subscript_wire_set(_: WireKind) -> &'static str {
    "{obj}[{key}] = {v}"
}

fn identity_wire(_: WireKind) -> &'static str {
    "{v}"
}

fn python_widen(_: ShapeType) -> Option<&'static str> {
    None
}

fn python_narrow(ty: ShapeType) -> Option<&'static str> {
    match ty {
        ShapeType::Float | ShapeType::Double => Some("float({v})"),
        _ => None,
    }
}

fn python_mismatch(ty: ShapeType) -> Option<&'static str> {
    match ty {
        ShapeType::Boolean => Some("not isinstance({v}, bool)"),
        ShapeType::Byte
        | ShapeType::Short
        | ShapeType::Integer
        | ShapeType::Long
        | ShapeType::BigInteger => Some("not isinstance({v}, int)"),
        ShapeType::Float | ShapeType::Double => Some("not isinstance({v}, (float, int))"),
        ShapeType::String | ShapeType::Enum => Some("not isinstance({v}, str)"),
        ShapeType::Timestamp => Some("not isinstance({v}, datetime.datetime)"),
        ShapeType::Blob => Some("not isinstance({v}, (bytes, bytearray))"),
        ShapeType::Document | ShapeType::Map => Some("not isinstance({v}, dict)"),
        ShapeType::List => Some("not isinstance({v}, list)"),
        ShapeType::Set => Some("not isinstance({v}, (set, frozenset))"),
        _ => None,
    }
}

fn python_entry_call(point: EntryPoint) -> &'static str {
    match point {
        EntryPoint::ToWire => "{v}._to_payload()",
        EntryPoint::FromWire => "{prefix}{type}._from_payload({v})",
        EntryPoint::Validate => "{v}._validate()",
    }
}

fn python_entry_ref(point: EntryPoint) -> &'static str {
    match point {
        EntryPoint::ToWire => "{prefix}{type}._to_payload",
        EntryPoint::FromWire => "{prefix}{type}._from_payload",
        EntryPoint::Validate => "{prefix}{type}._validate",
    }
}

fn python_entry_header(point: EntryPoint) -> &'static str {
    match point {
        EntryPoint::ToWire => "def _to_payload(self) -> typing.Dict[str, typing.Any]",
        EntryPoint::FromWire => {
            "@classmethod\ndef _from_payload(cls, payload: typing.Dict[str, typing.Any])"
        }
        EntryPoint::Validate => "def _validate(self) -> None",
    }
}

const PYTHON_RESERVED: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "self", "try", "while", "with", "yield",
];

pub static PYTHON: BackendProfile = BackendProfile {
    backend: Backend::Python,
    display_name: "Python",
    file_extension: "py",
    block: BlockStyle::Indent,
    indent: "    ",
    terminator: "",
    line_comment: "#",
    field_case: NameCase::Snake,
    variable_case: NameCase::Snake,
    reserved: PYTHON_RESERVED,

    scalars: python_scalars,
    list_type: "typing.List[{t}]",
    set_type: Some("typing.Set[{t}]"),
    map_type: "typing.Dict[str, {t}]",
    optional_type: "typing.Optional[{t}]",
    enum_as_string: true,
    wire_type: untyped_wire,
    native_wire_containers: true,

    this_name: "self",
    payload_name: "payload",
    null: "None",
    field_get: "{obj}.{field}",
    field_set: "{obj}.{field} = {v}",
    unwrap_optional: "{v}",
    present: "{v} is not None",
    absent: "{v} is None",
    wire_field: "{obj}[{key}]",
    wire_has: "{obj}.get({key}) is not None",
    wire_set: subscript_wire_set,
    wire_as: identity_wire,
    wire_wrap: identity_wire,
    widen: python_widen,
    narrow: python_narrow,
    mismatch: python_mismatch,
    base64_encode: "base64.b64encode({v}).decode('utf-8')",
    base64_decode: "base64.b64decode({v})",
    timestamp_to_epoch: "round({v}.timestamp(), 3)",
    epoch_to_timestamp: "datetime.datetime.fromtimestamp({v}, datetime.timezone.utc)",
    enum_to_wire: "{v}",
    enum_from_wire: "{v}",
    not_empty_text: "len({v}) > 0",
    not_empty_bytes: "len({v}) > 0",
    new_wire_object: "{}",
    new_wire_array: "[]",
    new_list: "[]",
    new_set: "set()",
    new_map: "{}",
    new_instance: "{type}()",
    empty_blob: "b''",
    this_call: "self.{method}({args})",

    declare: "{name} = {v}",
    assign: "{name} = {v}",
    append_list: "{c}.append({v})",
    append_set: "{c}.add({v})",
    insert: "{c}[{key}] = {v}",
    for_each: "for {item} in {source}",
    for_entries: "for {key}, {value} in {source}",
    entry_bindings: &[],
    entries_typed: "{v}.items()",
    entries_wire: "{v}.items()",
    if_header: "if {cond}",
    fail: "raise ValueError({msg})",

    entry_call: python_entry_call,
    entry_ref: python_entry_ref,
    entry_header: python_entry_header,

    client: ClientTemplates {
        has_sync: true,
        async_suffix: "_async",
        method_case: NameCase::Snake,
        async_return: "concurrent.futures.Future",
        handler_param: "typing.Optional[{handler}]",
        executor_param: "typing.Optional[concurrent.futures.Executor]",
        connection: "self._connection",
        model_prefix: "model.",
        invoke: "invoke",
        unwrap: "_unwrap",
        marshal: "_marshal_{handler_snake}",
        method_header: "def {name}(self, {params}) -> {ret}",
        param: "{name}: {ty}",
        unwrap_helper: r#"def _unwrap(future):
    try:
        return future.result()
    except {error}:
        raise
    except Exception as e:
        raise RuntimeError(e) from e"#,
        handler_decl: r#"class {handler}:
    def on_stream_event(self, event: {event}) -> None:
        pass

    def on_stream_error(self, error: Exception) -> None:
        pass

    def on_stream_closed(self) -> None:
        pass"#,
        marshal_decorator: r#"class _{handler}OnExecutor({handler}):
    def __init__(self, delegate: {handler}, executor: concurrent.futures.Executor):
        self._delegate = delegate
        self._executor = executor

    def on_stream_event(self, event: {event}) -> None:
        self._executor.submit(self._delegate.on_stream_event, event)

    def on_stream_error(self, error: Exception) -> None:
        self._executor.submit(self._delegate.on_stream_error, error)

    def on_stream_closed(self) -> None:
        self._executor.submit(self._delegate.on_stream_closed)


def {marshal}(handler, executor):
    if handler is None or executor is None:
        return handler
    return _{handler}OnExecutor(handler, executor)"#,
    },
};

// ============================================================================
// TypeScript
// ============================================================================

fn typescript_scalars(ty: ShapeType) -> Option<Scalar> {
    match ty {
        ShapeType::Boolean => scalar("boolean"),
        ShapeType::Byte
        | ShapeType::Short
        | ShapeType::Integer
        | ShapeType::Long
        | ShapeType::Float
        | ShapeType::Double => scalar("number"),
        ShapeType::String | ShapeType::Enum => scalar("string"),
        ShapeType::Timestamp => scalar("Date"),
        ShapeType::Blob => scalar("Uint8Array"),
        ShapeType::Document => scalar("any"),
        _ => None,
    }
}

fn typescript_wire_type(kind: WireKind) -> &'static str {
    match kind {
        WireKind::Bool => "boolean",
        WireKind::Int | WireKind::Int64 | WireKind::Double => "number",
        WireKind::String => "string",
        WireKind::Object | WireKind::Document => "any",
        WireKind::Array => "any[]",
    }
}

fn no_cast(_: ShapeType) -> Option<&'static str> {
    None
}

fn typescript_mismatch(ty: ShapeType) -> Option<&'static str> {
    match ty {
        ShapeType::Boolean => Some("typeof {v} !== 'boolean'"),
        ShapeType::Byte
        | ShapeType::Short
        | ShapeType::Integer
        | ShapeType::Long
        | ShapeType::Float
        | ShapeType::Double => Some("typeof {v} !== 'number'"),
        ShapeType::String | ShapeType::Enum => Some("typeof {v} !== 'string'"),
        ShapeType::Timestamp => Some("!({v} instanceof Date)"),
        ShapeType::Blob => Some("!({v} instanceof Uint8Array)"),
        ShapeType::List => Some("!Array.isArray({v})"),
        ShapeType::Map => Some("typeof {v} !== 'object'"),
        _ => None,
    }
}

fn typescript_entry_call(point: EntryPoint) -> &'static str {
    match point {
        EntryPoint::ToWire => "{prefix}toWire{type}({v})",
        EntryPoint::FromWire => "{prefix}fromWire{type}({v})",
        EntryPoint::Validate => "{prefix}validate{type}({v})",
    }
}

fn typescript_entry_ref(point: EntryPoint) -> &'static str {
    match point {
        EntryPoint::ToWire => "{prefix}toWire{type}",
        EntryPoint::FromWire => "{prefix}fromWire{type}",
        EntryPoint::Validate => "{prefix}validate{type}",
    }
}

fn typescript_entry_header(point: EntryPoint) -> &'static str {
    match point {
        EntryPoint::ToWire => "export function toWire{type}(value: {type}): any",
        EntryPoint::FromWire => "export function fromWire{type}(payload: any): {type}",
        EntryPoint::Validate => "export function validate{type}(value: {type}): void",
    }
}

const TYPESCRIPT_RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "import", "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with",
];

pub static TYPESCRIPT: BackendProfile = BackendProfile {
    backend: Backend::Javascript,
    display_name: "TypeScript",
    file_extension: "ts",
    block: BlockStyle::Braces,
    indent: "    ",
    terminator: ";",
    line_comment: "//",
    field_case: NameCase::Camel,
    variable_case: NameCase::Camel,
    reserved: TYPESCRIPT_RESERVED,

    scalars: typescript_scalars,
    list_type: "Array<{t}>",
    set_type: None,
    map_type: "{ [key: string]: {t} }",
    optional_type: "{t}",
    enum_as_string: false,
    wire_type: typescript_wire_type,
    native_wire_containers: true,

    this_name: "value",
    payload_name: "payload",
    null: "undefined",
    field_get: "{obj}.{field}",
    field_set: "{obj}.{field} = {v}",
    unwrap_optional: "{v}",
    present: "{v} !== undefined",
    absent: "{v} === undefined",
    wire_field: "{obj}[{key}]",
    wire_has: "{obj}[{key}] !== undefined",
    wire_set: subscript_wire_set,
    wire_as: identity_wire,
    wire_wrap: identity_wire,
    widen: no_cast,
    narrow: no_cast,
    mismatch: typescript_mismatch,
    base64_encode: "Buffer.from({v}).toString('base64')",
    base64_decode: "new Uint8Array(Buffer.from({v}, 'base64'))",
    timestamp_to_epoch: "{v}.getTime() / 1000",
    epoch_to_timestamp: "new Date(Math.round({v} * 1000))",
    enum_to_wire: "{v}",
    enum_from_wire: "{v} as {type}",
    not_empty_text: "{v}.length > 0",
    not_empty_bytes: "{v}.length > 0",
    new_wire_object: "{}",
    new_wire_array: "[]",
    new_list: "[]",
    new_set: "new Set()",
    new_map: "{}",
    new_instance: "{}",
    empty_blob: "new Uint8Array(0)",
    this_call: "this.{method}({args})",

    declare: "let {name}: {ty} = {v}",
    assign: "{name} = {v}",
    append_list: "{c}.push({v})",
    append_set: "{c}.add({v})",
    insert: "{c}[{key}] = {v}",
    for_each: "for (const {item} of {source})",
    for_entries: "for (const [{key}, {value}] of {source})",
    entry_bindings: &[],
    entries_typed: "Object.entries({v})",
    entries_wire: "Object.entries({v})",
    if_header: "if ({cond})",
    fail: "throw new Error({msg})",

    entry_call: typescript_entry_call,
    entry_ref: typescript_entry_ref,
    entry_header: typescript_entry_header,

    client: ClientTemplates {
        has_sync: false,
        async_suffix: "",
        method_case: NameCase::Camel,
        async_return: "Promise<{t}>",
        handler_param: "{handler} | undefined",
        executor_param: "Executor | undefined",
        connection: "this.connection",
        model_prefix: "model.",
        invoke: "invoke",
        unwrap: "",
        marshal: "marshal{handler}",
        method_header: "async {name}({params}): {ret}",
        param: "{name}: {ty}",
        unwrap_helper: "",
        handler_decl: r#"export interface {handler} {
    onStreamEvent(event: {event}): void;
    onStreamError(error: Error): void;
    onStreamClosed(): void;
}"#,
        marshal_decorator: r#"function {marshal}(handler: {handler} | undefined, executor: Executor | undefined): {handler} | undefined {
    if (handler === undefined || executor === undefined) {
        return handler;
    }
    const delegate = handler;
    return {
        onStreamEvent: (event: {event}) => executor(() => delegate.onStreamEvent(event)),
        onStreamError: (error: Error) => executor(() => delegate.onStreamError(error)),
        onStreamClosed: () => executor(() => delegate.onStreamClosed()),
    };
}"#,
    },
};

// ============================================================================
// Java
// ============================================================================

fn java_scalars(ty: ShapeType) -> Option<Scalar> {
    match ty {
        ShapeType::Boolean => boxed("boolean", "Boolean"),
        ShapeType::Byte => boxed("byte", "Byte"),
        ShapeType::Short => boxed("short", "Short"),
        ShapeType::Integer => boxed("int", "Integer"),
        ShapeType::Long => boxed("long", "Long"),
        ShapeType::Float => boxed("float", "Float"),
        ShapeType::Double => boxed("double", "Double"),
        ShapeType::String => scalar("String"),
        ShapeType::Timestamp => scalar("Instant"),
        ShapeType::Blob => scalar("byte[]"),
        ShapeType::Document => scalar("JsonElement"),
        _ => None,
    }
}

fn java_wire_type(kind: WireKind) -> &'static str {
    match kind {
        WireKind::Bool => "boolean",
        WireKind::Int => "int",
        WireKind::Int64 => "long",
        WireKind::Double => "double",
        WireKind::String => "String",
        WireKind::Object => "JsonObject",
        WireKind::Array => "JsonArray",
        WireKind::Document => "JsonElement",
    }
}

fn java_wire_set(kind: WireKind) -> &'static str {
    match kind {
        WireKind::Object | WireKind::Array | WireKind::Document => "{obj}.add({key}, {v})",
        _ => "{obj}.addProperty({key}, {v})",
    }
}

fn java_wire_as(kind: WireKind) -> &'static str {
    match kind {
        WireKind::Bool => "{v}.getAsBoolean()",
        WireKind::Int => "{v}.getAsInt()",
        WireKind::Int64 => "{v}.getAsLong()",
        WireKind::Double => "{v}.getAsDouble()",
        WireKind::String => "{v}.getAsString()",
        WireKind::Object => "{v}.getAsJsonObject()",
        WireKind::Array => "{v}.getAsJsonArray()",
        WireKind::Document => "{v}",
    }
}

fn java_wire_wrap(kind: WireKind) -> &'static str {
    match kind {
        WireKind::Object | WireKind::Array | WireKind::Document => "{v}",
        _ => "new JsonPrimitive({v})",
    }
}

fn java_narrow(ty: ShapeType) -> Option<&'static str> {
    match ty {
        ShapeType::Byte => Some("(byte) {v}"),
        ShapeType::Short => Some("(short) {v}"),
        ShapeType::Float => Some("(float) {v}"),
        _ => None,
    }
}

fn java_entry_call(point: EntryPoint) -> &'static str {
    match point {
        EntryPoint::ToWire => "{codec}.toWire{type}({v})",
        EntryPoint::FromWire => "{codec}.fromWire{type}({v})",
        EntryPoint::Validate => "{codec}.validate{type}({v})",
    }
}

fn java_entry_ref(point: EntryPoint) -> &'static str {
    match point {
        EntryPoint::ToWire => "{codec}::toWire{type}",
        EntryPoint::FromWire => "{codec}::fromWire{type}",
        EntryPoint::Validate => "{codec}::validate{type}",
    }
}

fn java_entry_header(point: EntryPoint) -> &'static str {
    match point {
        EntryPoint::ToWire => "public static JsonObject toWire{type}({type} value)",
        EntryPoint::FromWire => "public static {type} fromWire{type}(JsonObject payload)",
        EntryPoint::Validate => "public static void validate{type}({type} value)",
    }
}

const JAVA_RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "default", "do", "double", "else", "enum", "extends", "false",
    "final", "finally", "float", "for", "goto", "if", "implements", "import", "instanceof",
    "int", "interface", "long", "native", "new", "null", "package", "private", "protected",
    "public", "return", "short", "static", "strictfp", "super", "switch", "synchronized",
    "this", "throw", "throws", "transient", "true", "try", "void", "volatile", "while",
];

pub static JAVA: BackendProfile = BackendProfile {
    backend: Backend::Java,
    display_name: "Java",
    file_extension: "java",
    block: BlockStyle::Braces,
    indent: "    ",
    terminator: ";",
    line_comment: "//",
    field_case: NameCase::Camel,
    variable_case: NameCase::Camel,
    reserved: JAVA_RESERVED,

    scalars: java_scalars,
    list_type: "List<{t}>",
    set_type: Some("Set<{t}>"),
    map_type: "Map<String, {t}>",
    optional_type: "{t}",
    enum_as_string: false,
    wire_type: java_wire_type,
    native_wire_containers: false,

    this_name: "value",
    payload_name: "payload",
    null: "null",
    field_get: "{obj}.get{Field}()",
    field_set: "{obj}.set{Field}({v})",
    unwrap_optional: "{v}",
    present: "{v} != null",
    absent: "{v} == null",
    wire_field: "{obj}.get({key})",
    wire_has: "{obj}.has({key}) && !{obj}.get({key}).isJsonNull()",
    wire_set: java_wire_set,
    wire_as: java_wire_as,
    wire_wrap: java_wire_wrap,
    widen: no_cast,
    narrow: java_narrow,
    mismatch: no_mismatch,
    base64_encode: "Base64.getEncoder().encodeToString({v})",
    base64_decode: "Base64.getDecoder().decode({v})",
    timestamp_to_epoch: "{v}.toEpochMilli() / 1000.0",
    epoch_to_timestamp: "Instant.ofEpochMilli(Math.round({v} * 1000.0))",
    enum_to_wire: "{v}.getValue()",
    enum_from_wire: "{type}.fromValue({v})",
    not_empty_text: "!{v}.isEmpty()",
    not_empty_bytes: "{v}.length > 0",
    new_wire_object: "new JsonObject()",
    new_wire_array: "new JsonArray()",
    new_list: "new ArrayList<>()",
    new_set: "new HashSet<>()",
    new_map: "new HashMap<>()",
    new_instance: "new {type}()",
    empty_blob: "new byte[0]",
    this_call: "{method}({args})",

    declare: "{ty} {name} = {v}",
    assign: "{name} = {v}",
    append_list: "{c}.add({v})",
    append_set: "{c}.add({v})",
    insert: "{c}.put({key}, {v})",
    for_each: "for (var {item} : {source})",
    for_entries: "for (var {entry} : {source})",
    entry_bindings: &[
        "String {key} = {entry}.getKey();",
        "var {value} = {entry}.getValue();",
    ],
    entries_typed: "{v}.entrySet()",
    entries_wire: "{v}.entrySet()",
    if_header: "if ({cond})",
    fail: "throw new IllegalArgumentException({msg})",

    entry_call: java_entry_call,
    entry_ref: java_entry_ref,
    entry_header: java_entry_header,

    client: ClientTemplates {
        has_sync: true,
        async_suffix: "Async",
        method_case: NameCase::Camel,
        async_return: "CompletableFuture<{t}>",
        handler_param: "{handler}",
        executor_param: "Executor",
        connection: "connection",
        model_prefix: "",
        invoke: "invoke",
        unwrap: "unwrap",
        marshal: "marshal{handler}",
        method_header: "public {ret} {name}({params})",
        param: "{ty} {name}",
        unwrap_helper: r#"private static <T> T unwrap(CompletableFuture<T> future) {
    try {
        return future.get();
    } catch (ExecutionException e) {
        Throwable cause = e.getCause();
        if (cause instanceof {error}) {
            throw ({error}) cause;
        }
        throw new RuntimeException(cause);
    } catch (InterruptedException e) {
        Thread.currentThread().interrupt();
        throw new RuntimeException(e);
    }
}"#,
        handler_decl: r#"public interface {handler} {
    void onStreamEvent({event} event);

    void onStreamError(Throwable error);

    void onStreamClosed();
}"#,
        marshal_decorator: r#"private static final class {handler}OnExecutor implements {handler} {
    private final {handler} delegate;
    private final Executor executor;

    {handler}OnExecutor({handler} delegate, Executor executor) {
        this.delegate = delegate;
        this.executor = executor;
    }

    @Override
    public void onStreamEvent({event} event) {
        executor.execute(() -> delegate.onStreamEvent(event));
    }

    @Override
    public void onStreamError(Throwable error) {
        executor.execute(() -> delegate.onStreamError(error));
    }

    @Override
    public void onStreamClosed() {
        executor.execute(delegate::onStreamClosed);
    }
}

private static {handler} {marshal}({handler} handler, Executor executor) {
    if (handler == null || executor == null) {
        return handler;
    }
    return new {handler}OnExecutor(handler, executor);
}"#,
    },
};
