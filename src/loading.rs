use crate::archetypes::{Archetype, Archetypes, FighterStats};
use crate::components::{AiKind, Rgb};

/// Parse a KDL file and return the document. Logs a warning and returns None on failure.
fn parse_kdl_file(path: &str) -> Option<kdl::KdlDocument> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("failed to read {}: {}", path, e);
            return None;
        }
    };
    parse_kdl(path, &content)
}

fn parse_kdl(source: &str, content: &str) -> Option<kdl::KdlDocument> {
    match content.parse::<kdl::KdlDocument>() {
        Ok(doc) => Some(doc),
        Err(e) => {
            log::warn!("failed to parse KDL {}: {}", source, e);
            None
        }
    }
}

/// Helper to get a string value from a child node's first argument.
fn child_str<'a>(children: &'a kdl::KdlDocument, key: &str) -> Option<&'a str> {
    children.get_arg(key)?.as_string()
}

/// Helper to get an i128 value from a child node's first argument.
fn child_i128(children: &kdl::KdlDocument, key: &str) -> Option<i128> {
    children.get_arg(key)?.as_integer()
}

fn child_i32(children: &kdl::KdlDocument, key: &str) -> Option<i32> {
    i32::try_from(child_i128(children, key)?).ok()
}

/// `color R G B` with each channel in 0..=255.
fn child_rgb(children: &kdl::KdlDocument, key: &str) -> Option<Rgb> {
    let node = children.get(key)?;
    let channel = |i: usize| -> Option<u8> { u8::try_from(node.get(i)?.as_integer()?).ok() };
    Some(Rgb(channel(0)?, channel(1)?, channel(2)?))
}

fn ai_kind(name: &str) -> Option<AiKind> {
    match name {
        "hostile" => Some(AiKind::Hostile),
        _ => None,
    }
}

/// Build one archetype from a `player`/`archetype` node. Nodes without a
/// name, a positive `hp`, or with an unknown `ai` are skipped. A missing
/// `ai` means hostile.
fn parse_archetype(node: &kdl::KdlNode) -> Option<Archetype> {
    let name = node.get(0).and_then(|v| v.as_string())?.to_string();
    let Some(children) = node.children() else {
        log::warn!("archetype {:?} has no body, skipped", name);
        return None;
    };

    let glyph = child_str(children, "glyph")
        .and_then(|s| s.chars().next())
        .unwrap_or('?');
    let color = child_rgb(children, "color").unwrap_or(Rgb(255, 255, 255));

    let hp = child_i32(children, "hp").filter(|&hp| hp > 0);
    let Some(hp) = hp else {
        log::warn!("archetype {:?} needs a positive hp, skipped", name);
        return None;
    };
    let fighter = FighterStats {
        hp,
        defense: child_i32(children, "defense").unwrap_or(0),
        power: child_i32(children, "power").unwrap_or(0),
    };
    let ai = match child_str(children, "ai") {
        None => AiKind::Hostile,
        Some(s) => {
            let Some(kind) = ai_kind(s) else {
                log::warn!("archetype {:?} has unknown ai {:?}, skipped", name, s);
                return None;
            };
            kind
        }
    };
    let weight = child_i128(children, "weight")
        .and_then(|w| u32::try_from(w).ok())
        .unwrap_or(0);

    Some(Archetype {
        name,
        glyph,
        color,
        fighter: Some(fighter),
        ai: Some(ai),
        weight,
    })
}

/// Collect the player and monster templates from a parsed document. Any
/// half that is missing is taken from the built-in table.
fn archetypes_from_doc(doc: &kdl::KdlDocument) -> Archetypes {
    let defaults = Archetypes::default();
    let mut player = None;
    let mut monsters = Vec::new();

    for node in doc.nodes() {
        match node.name().to_string().as_str() {
            "player" => player = parse_archetype(node).or(player),
            "archetype" => monsters.extend(parse_archetype(node)),
            other => log::warn!("unknown node {:?} in archetype file", other),
        }
    }

    let player = player.unwrap_or_else(|| {
        log::warn!("no player archetype, using built-in");
        defaults.player.clone()
    });
    if monsters.iter().all(|m| m.weight == 0) {
        log::warn!("no spawnable monster archetypes, using built-in");
        monsters = defaults.monsters;
    }
    Archetypes { player, monsters }
}

/// Load player and monster templates from a KDL file, falling back to the
/// built-in table when the file is missing or unusable.
pub fn load_archetypes(path: &str) -> Archetypes {
    let Some(doc) = parse_kdl_file(path) else {
        return Archetypes::default();
    };
    let table = archetypes_from_doc(&doc);
    log::info!(
        "loaded {} monster archetypes from {}",
        table.monsters.len(),
        path
    );
    table
}

/// Same as `load_archetypes` but from in-memory KDL text.
pub fn parse_archetypes(content: &str) -> Archetypes {
    match parse_kdl("<inline>", content) {
        Some(doc) => archetypes_from_doc(&doc),
        None => Archetypes::default(),
    }
}
