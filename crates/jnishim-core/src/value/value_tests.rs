#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn JValue___bool___stores_jni_true_and_false() {
    let t = JValue::Bool(true).to_raw();
    let f = JValue::Bool(false).to_raw();

    assert_eq!(unsafe { t.z }, JNI_TRUE);
    assert_eq!(unsafe { f.z }, JNI_FALSE);
}

#[test]
fn JValue___long___occupies_full_union() {
    let raw = JValue::Long(i64::MIN + 7).to_raw();

    assert_eq!(unsafe { raw.j }, i64::MIN + 7);
}

#[test]
fn JValue___double___preserves_bits() {
    let value = f64::from_bits(0x7ff8_0000_dead_beef);

    let raw = JValue::Double(value).to_raw();

    assert_eq!(unsafe { raw.d }.to_bits(), 0x7ff8_0000_dead_beef);
}

#[test]
fn JValue___object___keeps_handle_identity() {
    let handle = 0x1000 as jobject;

    let raw = JValue::Object(handle).to_raw();

    assert_eq!(unsafe { raw.l }, handle);
}

#[test]
fn JValue___void___is_all_zero() {
    let raw = JValue::Void.to_raw();

    assert_eq!(unsafe { raw.j }, 0);
}

#[test]
fn to_jvalues___mixed_arguments___keeps_positions() {
    let args = [JValue::Int(3), JValue::Char(0x263A), JValue::Short(-9)];

    let raw = to_jvalues(&args);

    assert_eq!(raw.len(), 3);
    assert_eq!(unsafe { raw[0].i }, 3);
    assert_eq!(unsafe { raw[1].c }, 0x263A);
    assert_eq!(unsafe { raw[2].s }, -9);
}

#[test]
fn JValue___from_primitives___selects_variant() {
    assert_eq!(JValue::from(1i8), JValue::Byte(1));
    assert_eq!(JValue::from(2u16), JValue::Char(2));
    assert_eq!(JValue::from(3i16), JValue::Short(3));
    assert_eq!(JValue::from(4i32), JValue::Int(4));
    assert_eq!(JValue::from(5i64), JValue::Long(5));
    assert_eq!(JValue::from(true), JValue::Bool(true));
}

#[test]
fn JValue___accessors___return_none_for_other_variants() {
    let value = JValue::Int(42);

    assert_eq!(value.as_int(), Some(42));
    assert_eq!(value.as_long(), None);
    assert!(value.as_object().is_null());
    assert_eq!(value.java_type(), JavaType::Int);
}

#[test_case("V", Some(JavaType::Void))]
#[test_case("Z", Some(JavaType::Boolean))]
#[test_case("B", Some(JavaType::Byte))]
#[test_case("C", Some(JavaType::Char))]
#[test_case("S", Some(JavaType::Short))]
#[test_case("I", Some(JavaType::Int))]
#[test_case("J", Some(JavaType::Long))]
#[test_case("F", Some(JavaType::Float))]
#[test_case("D", Some(JavaType::Double))]
#[test_case("Ljava/lang/String;", Some(JavaType::Object))]
#[test_case("[B", Some(JavaType::Object))]
#[test_case("Q", None)]
#[test_case("", None)]
fn JavaType___from_descriptor___parses_first_char(descriptor: &str, expected: Option<JavaType>) {
    assert_eq!(JavaType::from_descriptor(descriptor), expected);
}

#[test_case("()V", Some(JavaType::Void))]
#[test_case("(ILjava/lang/String;)Z", Some(JavaType::Boolean))]
#[test_case("()Ljava/lang/ClassLoader;", Some(JavaType::Object))]
#[test_case("(Ljava/lang/String;)[I", Some(JavaType::Object))]
#[test_case("not a signature", None)]
fn JavaType___of_method_return___reads_after_paren(signature: &str, expected: Option<JavaType>) {
    assert_eq!(JavaType::of_method_return(signature), expected);
}

#[test_case(ReleaseMode::CopyBackAndFree, 0)]
#[test_case(ReleaseMode::Commit, 1)]
#[test_case(ReleaseMode::Abort, 2)]
fn ReleaseMode___code___matches_interface_constants(mode: ReleaseMode, code: jint) {
    assert_eq!(mode.code(), code);
    assert_eq!(ReleaseMode::from_code(code), Some(mode));
}

#[test]
fn ReleaseMode___from_code_unknown___returns_none() {
    assert_eq!(ReleaseMode::from_code(9), None);
}
