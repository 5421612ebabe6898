//! Picks the handler method a request's path names.
//!
//! The candidate forms are tried in a fixed order and the first one that
//! names an existing, routable method wins. A path that fits no form, or
//! only names methods the reflection keeps off the table, resolves to
//! nothing.

use crate::http::Method;
use crate::reflect::{is_verb, Reflection, Signature};

/// A resolved method and the path segments left over for binding.
pub(crate) struct Resolved<'refl, 'req> {
    pub signature: &'refl Signature,
    pub rest: Vec<&'req str>,
}

/// The candidate action forms, in precedence order.
#[derive(Clone, Copy)]
enum Form {
    /// The `index` method, for `/discussions` and `/discussions/p2`, with
    /// an optional page token.
    Index,
    /// A `get_recent` method for `GET /discussions/recent`; the word
    /// becomes part of the method name.
    VerbWord,
    /// The `get` method with an id argument for `GET /discussions/123`, or
    /// the `help` method with the id leading its arguments for
    /// `/discussions/123/help`.
    Identifier,
    /// A method named after the segment itself, as in `/discussions/me`.
    Word,
}

const FORMS: [Form; 4] = [Form::Index, Form::VerbWord, Form::Identifier, Form::Word];

pub(crate) fn resolve<'refl, 'req>(
    reflect: &'refl Reflection,
    method: Method,
    segments: &'req [String],
) -> Option<Resolved<'refl, 'req>> {
    FORMS
        .iter()
        .find_map(|form| apply(*form, reflect, method.lower(), segments))
}

fn apply<'refl, 'req>(
    form: Form,
    reflect: &'refl Reflection,
    verb: &str,
    segments: &'req [String],
) -> Option<Resolved<'refl, 'req>> {
    match form {
        Form::Index => {
            let rest = match segments {
                [] => Vec::new(),
                [page] if is_page_token(page) => vec![page.as_str()],
                _ => return None,
            };
            let signature = reflect.routable("index")?;
            Some(Resolved { signature, rest })
        }
        Form::VerbWord => {
            let (first, rest) = segments.split_first()?;
            if !is_word(first) {
                return None;
            }
            let signature = reflect.routable(&format!("{}_{}", verb, first))?;
            Some(Resolved {
                signature,
                rest: borrow(rest),
            })
        }
        Form::Identifier => {
            let (first, rest) = segments.split_first()?;
            if !is_identifier(first) {
                return None;
            }

            // `/discussions/123/help/...` names the `help` method, with the
            // id left in front of the remaining segments for binding.
            if let Some((word, tail)) = rest.split_first() {
                if is_word(word) && !is_reserved(word) {
                    if let Some(signature) = reflect.routable(word) {
                        let mut args = vec![first.as_str()];
                        args.extend(tail.iter().map(String::as_str));
                        return Some(Resolved {
                            signature,
                            rest: args,
                        });
                    }
                }
            }

            let signature = reflect.routable(verb)?;
            Some(Resolved {
                signature,
                rest: borrow(segments),
            })
        }
        Form::Word => {
            let (first, rest) = segments.split_first()?;
            if !is_word(first) || is_reserved(first) {
                return None;
            }
            let signature = reflect.routable(first)?;
            Some(Resolved {
                signature,
                rest: borrow(rest),
            })
        }
    }
}

fn borrow(segments: &[String]) -> Vec<&str> {
    segments.iter().map(String::as_str).collect()
}

/// A page token: `p` followed by digits, as in `/discussions/p2`.
fn is_page_token(segment: &str) -> bool {
    match segment.strip_prefix('p') {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// An opaque identifier segment: all digits.
fn is_identifier(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// A segment that could name a method.
fn is_word(segment: &str) -> bool {
    let mut bytes = segment.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() || b == b'_' => {
            bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
        }
        _ => false,
    }
}

/// Action words that never resolve when used as literal path segments:
/// `index` and the HTTP verbs are reachable only through their own forms.
fn is_reserved(segment: &str) -> bool {
    segment == "index" || is_verb(segment)
}
