//! Envelope synthesis.
//!
//! For one [`GenerationRequest`] the synthesizer produces four groups of
//! items that share a single discriminator vocabulary:
//!
//! 1. the capability enum with one case per variant, each variant's
//!    `Tagged` label and a `From` conversion;
//! 2. the envelope struct holding exactly one optional capability value;
//! 3. the write path (`tag` and `Serialize`);
//! 4. the read path (`read_envelope` and `Deserialize`), which decodes the
//!    tag first and the value second from one buffered input.

use typedwire_codegen::builder::{CodeFragment, Renderable};
use typedwire_request::GenerationRequest;

use crate::{
    ast::{Arm, Const, Enum, Field, Fn, Impl, Match, Param, Struct, Variant},
    naming::{field_name, string_literal},
    paths::Paths,
};

/// Generated items for one envelope, grouped by role.
#[derive(Debug, Clone)]
pub struct SynthesizedAdapter {
    pub capability: Vec<CodeFragment>,
    pub envelope_type: Vec<CodeFragment>,
    pub writer: Vec<CodeFragment>,
    pub reader: Vec<CodeFragment>,
}

impl Renderable for SynthesizedAdapter {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let groups = [
            &self.capability,
            &self.envelope_type,
            &self.writer,
            &self.reader,
        ];

        let mut fragments = Vec::new();
        for group in groups {
            if !fragments.is_empty() {
                fragments.push(CodeFragment::Blank);
            }
            fragments.extend(group.iter().cloned());
        }
        fragments
    }
}

/// A variant with every name the generated code needs.
struct Case {
    /// Enum case name.
    name: String,
    /// Type as referenced from the generated file.
    ty: String,
    /// String literal of the discriminator.
    tag: String,
}

/// Synthesizes the adapter for a single request.
pub(crate) struct EnvelopeSynthesizer<'a> {
    request: &'a GenerationRequest,
}

impl<'a> EnvelopeSynthesizer<'a> {
    pub(crate) fn new(request: &'a GenerationRequest) -> Self {
        Self { request }
    }

    pub(crate) fn synthesize(&self, paths: &mut Paths) -> SynthesizedAdapter {
        let cases: Vec<Case> = self
            .request
            .variants_with_tags()
            .map(|(variant, tag)| Case {
                name: variant.type_name().to_string(),
                ty: paths.type_path(variant.type_path()),
                tag: string_literal(tag),
            })
            .collect();

        SynthesizedAdapter {
            capability: self.capability(&cases, paths),
            envelope_type: self.envelope_type(paths),
            writer: self.writer(&cases, paths),
            reader: self.reader(&cases, paths),
        }
    }

    fn runtime(&self) -> &str {
        self.request.runtime()
    }

    fn capability(&self, cases: &[Case], paths: &mut Paths) -> Vec<CodeFragment> {
        let capability = self.request.capability();
        let tagged = paths.runtime(self.runtime(), "Tagged");

        let mut group = Enum::new(capability)
            .doc(format!(
                "A value stored in [`{}`]: one case per admitted variant.",
                self.request.envelope()
            ))
            .derives(
                self.request
                    .derives()
                    .iter()
                    .filter(|d| !is_default(d))
                    .cloned(),
            );
        for case in cases {
            group = group.variant(Variant::new(&case.name).tuple(&case.ty));
        }

        let tag = if cases.is_empty() {
            Match::new("*self")
        } else {
            cases.iter().fold(Match::new("self"), |m, case| {
                m.arm(Arm::new(format!("Self::{}(_)", case.name)).body(format!(
                    "<{} as {}<{}>>::TAG",
                    case.ty, tagged, capability
                )))
            })
        };

        let inherent = Impl::new(capability).method(
            Fn::new("tag")
                .doc("Discriminator of the wrapped variant.")
                .param(Param::new("&self", ""))
                .returns("&'static str")
                .body_node(tag),
        );

        let mut items: Vec<Vec<CodeFragment>> = vec![group.to_fragments(), inherent.to_fragments()];

        for case in cases {
            items.push(
                Impl::new(&case.ty)
                    .for_trait(format!("{}<{}>", tagged, capability))
                    .constant(Const::new("TAG", "&'static str", &case.tag))
                    .to_fragments(),
            );
            items.push(
                Impl::new(capability)
                    .for_trait(format!("From<{}>", case.ty))
                    .method(
                        Fn::new("from")
                            .param(Param::new("value", &case.ty))
                            .returns("Self")
                            .body_line(format!("Self::{}(value)", case.name)),
                    )
                    .to_fragments(),
            );
        }

        join(items)
    }

    fn envelope_type(&self, paths: &mut Paths) -> Vec<CodeFragment> {
        let capability = self.request.capability();
        let envelope = self.request.envelope();
        let field = field_name(capability);
        let keys = paths.runtime(self.runtime(), "Keys");

        let mut derives: Vec<String> = self.request.derives().to_vec();
        if !derives.iter().any(|d| is_default(d)) {
            derives.push("Default".to_string());
        }

        let record = Struct::new(envelope)
            .doc(format!(
                "Envelope for a [`{}`], written as `{{{}, {}}}`.",
                capability,
                self.request.keys().tag(),
                self.request.keys().value()
            ))
            .derives(derives)
            .field(Field::new(&field, format!("Option<{}>", capability)));

        let inherent = Impl::new(envelope)
            .constant(
                Const::new("NAME", "&'static str", string_literal(envelope))
                    .doc("Envelope name used in error messages."),
            )
            .constant(Const::new(
                "KEYS",
                &keys,
                format!(
                    "{}::new({}, {})",
                    keys,
                    string_literal(self.request.keys().tag()),
                    string_literal(self.request.keys().value())
                ),
            ))
            .method(
                Fn::new("new")
                    .param(Param::new("value", format!("impl Into<{}>", capability)))
                    .returns("Self")
                    .body_line(format!("Self {{ {}: Some(value.into()) }}", field)),
            );

        join(vec![record.to_fragments(), inherent.to_fragments()])
    }

    fn writer(&self, cases: &[Case], paths: &mut Paths) -> Vec<CodeFragment> {
        let capability = self.request.capability();
        let envelope = self.request.envelope();
        let field = field_name(capability);
        let result = paths.result();
        let error = paths.runtime(self.runtime(), "Error");
        let tagged = paths.runtime(self.runtime(), "Tagged");
        let write_envelope = paths.runtime(self.runtime(), "write_envelope");
        let ser_error = paths.runtime(self.runtime(), "ser_error");
        let serialize = paths.serde(self.runtime(), "Serialize");
        let serializer = paths.serde(self.runtime(), "Serializer");

        let tag = Impl::new(envelope).method(
            Fn::new("tag")
                .doc("Discriminator of the stored value; fails when nothing is stored.")
                .param(Param::new("&self", ""))
                .returns(format!("{}<&'static str, {}>", result, error))
                .body_line(format!("self.{}", field))
                .body_line("    .as_ref()")
                .body_line(format!("    .map({}::tag)", capability))
                .body_line(format!(
                    "    .ok_or_else(|| {}::missing_value(Self::NAME))",
                    error
                )),
        );

        let dispatch = if cases.is_empty() {
            vec![
                CodeFragment::line("let _ = serializer;"),
                CodeFragment::line("match *value {}"),
            ]
        } else {
            cases.iter().fold(Match::new("value"), |m, case| {
                m.arm(Arm::new(format!("{}::{}(inner)", capability, case.name)).body(format!(
                    "{}(serializer, Self::NAME, Self::KEYS, <{} as {}<{}>>::TAG, inner)",
                    write_envelope, case.ty, tagged, capability
                )))
            })
            .to_fragments()
        };

        let serialize = Impl::new(envelope).for_trait(serialize).method(
            Fn::new("serialize")
                .generic("S")
                .param(Param::new("&self", ""))
                .param(Param::new("serializer", "S"))
                .returns(format!("{}<S::Ok, S::Error>", result))
                .where_clause(format!("S: {}", serializer))
                .body_line(format!("let value = self.{}.as_ref().ok_or_else(|| {{", field))
                .body_line(format!(
                    "    {}::<S::Error>({}::missing_value(Self::NAME))",
                    ser_error, error
                ))
                .body_line("})?;")
                .body_node(dispatch),
        );

        join(vec![tag.to_fragments(), serialize.to_fragments()])
    }

    fn reader(&self, cases: &[Case], paths: &mut Paths) -> Vec<CodeFragment> {
        let capability = self.request.capability();
        let envelope = self.request.envelope();
        let field = field_name(capability);
        let result = paths.result();
        let error = paths.runtime(self.runtime(), "Error");
        let raw_envelope = paths.runtime(self.runtime(), "RawEnvelope");
        let de_error = paths.runtime(self.runtime(), "de_error");
        let deserialize = paths.serde(self.runtime(), "Deserialize");
        let deserializer = paths.serde(self.runtime(), "Deserializer");

        let mut read = Fn::new("read_envelope")
            .doc("Decode the tag, then the value of the matching variant, and store it.")
            .param(Param::new("&mut self", ""))
            .param(Param::new("raw", format!("&{}", raw_envelope)))
            .returns(format!("{}<(), {}>", result, error))
            .body_line("let tag = raw.tag(Self::KEYS.tag)?;");

        read = if cases.is_empty() {
            read.body_line(format!("Err({}::unknown_variant(Self::NAME, tag))", error))
        } else {
            let select = cases
                .iter()
                .fold(Match::new("tag.as_str()").bind("value"), |m, case| {
                    m.arm(Arm::new(&case.tag).body(format!(
                        "{}::{}(raw.payload(Self::KEYS.value)?)",
                        capability, case.name
                    )))
                })
                .arm(Arm::new("other").body(format!(
                    "return Err({}::unknown_variant(Self::NAME, other))",
                    error
                )));
            read.body_node(select)
                .body_line(format!("self.{} = Some(value);", field))
                .body_line("Ok(())")
        };

        let inherent = Impl::new(envelope).method(read);

        let deserialize = Impl::new(envelope)
            .generics("'de")
            .for_trait(format!("{}<'de>", deserialize))
            .method(
                Fn::new("deserialize")
                    .generic("D")
                    .param(Param::new("deserializer", "D"))
                    .returns(format!("{}<Self, D::Error>", result))
                    .where_clause(format!("D: {}<'de>", deserializer))
                    .body_line(format!(
                        "let raw = {}::from_deserializer(deserializer)?;",
                        raw_envelope
                    ))
                    .body_line(format!("let mut envelope = Self {{ {}: None }};", field))
                    .body_line("envelope")
                    .body_line("    .read_envelope(&raw)")
                    .body_line(format!("    .map_err({}::<D::Error>)?;", de_error))
                    .body_line("Ok(envelope)"),
            );

        join(vec![inherent.to_fragments(), deserialize.to_fragments()])
    }
}

/// Enums with data cases cannot derive `Default`; the envelope always does.
fn is_default(derive: &str) -> bool {
    derive.rsplit("::").next() == Some("Default")
}

/// Concatenate items with one blank line between them.
fn join(items: Vec<Vec<CodeFragment>>) -> Vec<CodeFragment> {
    let mut fragments = Vec::new();
    for item in items {
        if !fragments.is_empty() {
            fragments.push(CodeFragment::Blank);
        }
        fragments.extend(item);
    }
    fragments
}
