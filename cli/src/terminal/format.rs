use colored::*;
use netdir_common::network::{NetworkObject, ObjectKind};

use crate::terminal::colors;

pub fn kind_tag(kind: ObjectKind) -> ColoredString {
    match kind {
        ObjectKind::Group => "group".color(colors::GROUP),
        ObjectKind::Host => "host".color(colors::HOST),
        ObjectKind::Location => "location".color(colors::LOCATION),
        ObjectKind::Root => "root".color(colors::SEPARATOR),
        ObjectKind::None => "none".color(colors::SEPARATOR),
    }
}

/// `name [kind] address` on one line, address only when known.
pub fn object_label(object: &NetworkObject) -> String {
    let name: ColoredString = object.name.as_str().color(colors::PRIMARY);
    let tag: String = format!("[{}]", kind_tag(object.kind));

    match &object.host_address {
        Some(address) => format!("{name} {tag} {}", address.as_str().color(colors::ADDRESS)),
        None => format!("{name} {tag}"),
    }
}
