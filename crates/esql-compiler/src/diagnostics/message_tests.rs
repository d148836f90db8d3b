use super::{EnglishCatalog, MessageCatalog, MessageKey};

#[test]
fn format_substitutes_positional_arguments() {
    let out = EnglishCatalog.format(MessageKey::InvalidRootRowType, &["r1", "r2"]);
    insta::assert_snapshot!(out, @"The row types 'r1' and 'r2' do not have the same number of members.");
}

#[test]
fn format_reorders_arguments() {
    let out = EnglishCatalog.format(
        MessageKey::NoCanonicalFunctionOverloadMatch,
        &["Edm", "Length", "Length(Edm.Int32)"],
    );
    insta::assert_snapshot!(out, @"No overload of canonical function 'Length' is compatible with the argument types 'Length(Edm.Int32)'.");
}

#[test]
fn missing_argument_is_left_verbatim() {
    let out = EnglishCatalog.format(MessageKey::AliasNameAlreadyUsed, &[]);
    assert_eq!(out, "The alias '{0}' was already used");
}

#[test]
fn phrase_is_the_raw_template() {
    assert_eq!(EnglishCatalog.phrase(MessageKey::LocalizedKeyword), "keyword");
    assert_eq!(EnglishCatalog.phrase(MessageKey::LocalizedNear), "Near");
}

struct Shouting;

impl MessageCatalog for Shouting {
    fn template(&self, key: MessageKey) -> &str {
        match key {
            MessageKey::GenericSyntaxError => "SYNTAX!",
            other => other.english(),
        }
    }
}

#[test]
fn custom_catalog_overrides_templates() {
    let catalog = &Shouting;
    assert_eq!(catalog.phrase(MessageKey::GenericSyntaxError), "SYNTAX!");
    assert_eq!(catalog.phrase(MessageKey::LocalizedTerm), "term");
}
