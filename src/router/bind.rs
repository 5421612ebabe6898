//! Binds a resolved method's parameters from the request.
//!
//! Each parameter is filled according to the signature's cached plan:
//! injected values first, then path segments left to right. Binding either
//! produces a complete argument map or reports a mismatch; there is no
//! partially bound result.

use crate::action::{Args, Value};
use crate::controller::Controller;
use crate::http::Request;
use crate::reflect::{Bind, Signature};

use std::sync::Arc;

pub(crate) fn bind<'req>(
    signature: &Signature,
    segments: Vec<&'req str>,
    req: &'req Request,
    controller: &Arc<dyn Controller>,
) -> Option<Args<'req>> {
    let plan = signature.plan();
    let mut args = Args::with_capacity(plan.len());
    let mut cursor = 0;

    for (param, bind) in signature.params().iter().zip(plan) {
        let value = match bind {
            Bind::Request => Value::Request(req),
            Bind::Receiver => Value::Controller(Arc::clone(controller)),
            Bind::Query => Value::Query(req.query()),
            Bind::Tail => {
                let rest = segments[cursor..].to_vec();
                cursor = segments.len();
                Value::Tail(rest)
            }
            Bind::Segment { required } => match segments.get(cursor) {
                Some(segment) => {
                    cursor += 1;
                    Value::Segment(segment)
                }
                None if !required => Value::Segment(""),
                None => return None,
            },
        };
        args.push(param.name(), value);
    }

    // a path longer than the parameter list is a miss, not an error
    (cursor == segments.len()).then_some(args)
}
