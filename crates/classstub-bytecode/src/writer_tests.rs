use classstub_core::AccessFlags;

use crate::code::{CodeBuilder, Insn};
use crate::constants::ClassVersion;
use crate::reader::parse;
use crate::writer::{Attribute, ClassFile, FieldInfo, InnerClassEntry, MethodInfo};
use crate::{Code, WriteError};

const UOE: &str = "java/lang/UnsupportedOperationException";

/// `public class p.A` with a constant field, a throwing `run()I` and a
/// nested `p/A$B` record.
pub(crate) fn sample_class_bytes() -> Vec<u8> {
    let mut cf = ClassFile::new(ClassVersion::Java8);
    let pool = &mut cf.pool;

    cf.access = AccessFlags::PUBLIC | AccessFlags::SUPER;
    cf.this_class = pool.class("p/A").unwrap();
    cf.super_class = pool.class("java/lang/Object").unwrap();

    let five = pool.integer(5).unwrap();
    cf.fields.push(FieldInfo {
        access: AccessFlags::PUBLIC | AccessFlags::STATIC | AccessFlags::FINAL,
        name: pool.utf8("X").unwrap(),
        descriptor: pool.utf8("I").unwrap(),
        attributes: vec![Attribute::constant_value(pool, five).unwrap()],
    });

    let new = pool.class(UOE).unwrap();
    let message = pool.string("Not implemented!").unwrap();
    let init = pool
        .method_ref(UOE, "<init>", "(Ljava/lang/String;)V")
        .unwrap();
    let mut code = CodeBuilder::for_method("()I", false).unwrap();
    code.extend([
        Insn::New(new),
        Insn::Dup,
        Insn::Ldc(message),
        Insn::InvokeSpecial {
            method_ref: init,
            arg_slots: 1,
            ret_slots: 0,
        },
        Insn::Athrow,
    ]);
    let io = pool.class("java/io/IOException").unwrap();
    cf.methods.push(MethodInfo {
        access: AccessFlags::PUBLIC,
        name: pool.utf8("run").unwrap(),
        descriptor: pool.utf8("()I").unwrap(),
        attributes: vec![
            Attribute::code(pool, code.finish()).unwrap(),
            Attribute::exceptions(pool, vec![io]).unwrap(),
        ],
    });

    let inner = InnerClassEntry {
        inner_class: pool.class("p/A$B").unwrap(),
        outer_class: cf.this_class,
        inner_name: pool.utf8("B").unwrap(),
        access: AccessFlags::PUBLIC | AccessFlags::STATIC,
    };
    cf.attributes
        .push(Attribute::inner_classes(pool, vec![inner]).unwrap());

    cf.to_bytes().unwrap()
}

#[test]
fn header_layout() {
    let bytes = sample_class_bytes();
    assert_eq!(&bytes[..4], &[0xCA, 0xFE, 0xBA, 0xBE]);
    assert_eq!(&bytes[4..8], &[0, 0, 0, 52]);
}

#[test]
fn version_tiers() {
    for (version, major) in [
        (ClassVersion::Java6, 50),
        (ClassVersion::Java7, 51),
        (ClassVersion::Java8, 52),
    ] {
        let mut cf = ClassFile::new(version);
        cf.this_class = cf.pool.class("A").unwrap();
        cf.super_class = cf.pool.class("java/lang/Object").unwrap();
        let bytes = cf.to_bytes().unwrap();
        assert_eq!(u16::from_be_bytes([bytes[6], bytes[7]]), major);
    }
}

#[test]
fn written_class_parses_back() {
    let parsed = parse(&sample_class_bytes()).unwrap();

    assert_eq!(parsed.this_class, "p/A");
    assert_eq!(parsed.super_class.as_deref(), Some("java/lang/Object"));
    assert_eq!(parsed.access, AccessFlags::PUBLIC | AccessFlags::SUPER);

    let field = parsed.field("X").unwrap();
    assert_eq!(field.descriptor, "I");
    assert!(field.constant.is_some());

    let run = parsed.method("run").unwrap();
    assert_eq!(run.exceptions, ["java/io/IOException"]);
    let code = run.code.as_ref().unwrap();
    assert_eq!((code.max_stack, code.max_locals), (3, 1));
    assert_eq!(code.bytes.len(), 10);

    assert_eq!(parsed.inner_classes.len(), 1);
    assert_eq!(parsed.inner_classes[0].inner_name.as_deref(), Some("B"));
}

#[test]
fn attribute_names_are_interned_once() {
    let parsed = parse(&sample_class_bytes()).unwrap();
    assert_eq!(parsed.count_utf8("Code"), 1);
    assert_eq!(parsed.count_utf8(UOE), 1);
}

#[test]
fn oversized_code_is_rejected() {
    let mut cf = ClassFile::new(ClassVersion::Java8);
    let code = Code {
        max_stack: 0,
        max_locals: 0,
        bytes: vec![0xb1; 70_000],
    };
    let attribute = Attribute::code(&mut cf.pool, code).unwrap();
    cf.methods.push(MethodInfo {
        access: AccessFlags::NONE,
        name: cf.pool.utf8("m").unwrap(),
        descriptor: cf.pool.utf8("()V").unwrap(),
        attributes: vec![attribute],
    });

    assert_eq!(cf.to_bytes(), Err(WriteError::CodeTooLarge(70_000)));
}
