//! Source type spelling → JVM descriptor encoding.
//!
//! `int[][]` → `[[I`, `java.lang.String` → `Ljava/lang/String;`. Encoding is a
//! pure function: no lookups, no state.

/// Binary name of the root object type.
pub const OBJECT: &str = "java/lang/Object";

const ARRAY_SUFFIX: &str = "[]";
const VARARGS_SUFFIX: &str = "...";

/// Encode a source type spelling as a field descriptor.
///
/// Every `[]` pair contributes one leading `[`, a trailing `...` counts as one
/// more. Primitive keywords map to their single-letter codes and anything else
/// is treated as a (dotted or slashed) class name.
pub fn encode_type(spelling: &str) -> String {
    let (base, dims) = split_array_suffix(spelling);

    let mut out = String::with_capacity(base.len() + dims + 2);
    for _ in 0..dims {
        out.push('[');
    }

    match primitive_code(base) {
        Some(code) => out.push(code),
        None => {
            out.push('L');
            out.push_str(&binary_name(base));
            out.push(';');
        }
    }
    out
}

/// Split a spelling into its element name and array dimension count.
///
/// `"String[][]"` → `("String", 2)`, `"int..."` → `("int", 1)`.
pub fn split_array_suffix(spelling: &str) -> (&str, usize) {
    let mut base = spelling.trim();
    let mut dims = 0;

    if let Some(stripped) = base.strip_suffix(VARARGS_SUFFIX) {
        base = stripped.trim_end();
        dims += 1;
    }
    while let Some(stripped) = base.strip_suffix(ARRAY_SUFFIX) {
        base = stripped.trim_end();
        dims += 1;
    }

    (base, dims)
}

/// Single-letter descriptor code for a primitive keyword.
pub fn primitive_code(keyword: &str) -> Option<char> {
    let code = match keyword {
        "void" => 'V',
        "boolean" => 'Z',
        "byte" => 'B',
        "char" => 'C',
        "short" => 'S',
        "int" => 'I',
        "long" => 'J',
        "float" => 'F',
        "double" => 'D',
        _ => return None,
    };
    Some(code)
}

pub fn is_primitive(keyword: &str) -> bool {
    primitive_code(keyword).is_some()
}

/// Dotted qualified name → slash-separated binary name.
pub fn binary_name(qualified: &str) -> String {
    qualified.replace('.', "/")
}

/// `(params)ret`.
pub fn method_descriptor<S: AsRef<str>>(params: &[S], ret: &str) -> String {
    let mut out = String::from("(");
    for p in params {
        out.push_str(p.as_ref());
    }
    out.push(')');
    out.push_str(ret);
    out
}

/// Whether `text` is exactly one well-formed field descriptor.
///
/// `V` is accepted as well so return descriptors pass through the same check.
pub fn is_field_descriptor(text: &str) -> bool {
    let body = text.trim_start_matches('[');
    let dims = text.len() - body.len();

    match body.as_bytes() {
        [b'V'] => dims == 0,
        [b'Z' | b'B' | b'C' | b'S' | b'I' | b'J' | b'F' | b'D'] => true,
        [b'L', .., b';'] => {
            let name = &body[1..body.len() - 1];
            !name.is_empty()
                && !name.contains(['.', ';', '[', '<', '>'])
                && name.split('/').all(|segment| !segment.is_empty())
        }
        _ => false,
    }
}
