use crate::dump::dump;
use crate::reader::parse;
use crate::writer_tests::sample_class_bytes;

#[test]
fn dump_sample_class() {
    let parsed = parse(&sample_class_bytes()).unwrap();

    insta::assert_snapshot!(dump(&parsed), @r#"
    [class]
    version 52.0
    access 0x0021 public super
    this p/A
    super java/lang/Object

    [fields]
    0x0019 public static final X I = int 5

    [methods]
    0x0001 public run ()I
      throws java/io/IOException
      code stack=3 locals=1
        0 new java/lang/UnsupportedOperationException
        3 dup
        4 ldc "Not implemented!"
        6 invokespecial java/lang/UnsupportedOperationException.<init>(Ljava/lang/String;)V
        9 athrow

    [inner_classes]
    p/A$B outer p/A name B 0x0009 public static
    "#);
}

#[test]
fn unnamed_flag_bits_print_as_hex() {
    let mut parsed = parse(&sample_class_bytes()).unwrap();
    parsed.fields.clear();
    parsed.methods.clear();
    parsed.inner_classes.clear();
    // ACC_ENUM has no name in the class table.
    parsed.access = parsed.access | classstub_core::AccessFlags::from_bits(0x4000);

    insta::assert_snapshot!(dump(&parsed), @r"
    [class]
    version 52.0
    access 0x4021 public super 0x4000
    this p/A
    super java/lang/Object
    ");
}
