//! Property-based tests for value forwarding
//!
//! Primitive results must come back bit-identical, and strings and byte
//! arrays must survive a trip into the VM and back unchanged.

use jnishim::prelude::*;
use jnishim_ffi::testing::{FIXTURE_CLASS, FakeJvm};
use proptest::prelude::*;

fn echo_static(fake: &FakeJvm, sig: &str, arg: JValue) -> JValue {
    let vm = JavaVm::from_handle(fake.vm()).unwrap();
    let env = vm.get_env().unwrap();
    let cls = env.find_class(FIXTURE_CLASS).unwrap();
    let method = env.get_static_method_id(cls, "echo", sig).unwrap();
    let ret = JavaType::of_method_return(sig).unwrap();
    env.call_static_method(cls, method, ret, &[arg]).unwrap()
}

proptest! {
    /// Property: any int is returned unchanged
    #[test]
    fn proptest_int_echo_is_identity(value in any::<i32>()) {
        let fake = FakeJvm::new();

        prop_assert_eq!(echo_static(&fake, "(I)I", JValue::Int(value)), JValue::Int(value));
    }

    /// Property: any long is returned unchanged
    #[test]
    fn proptest_long_echo_is_identity(value in any::<i64>()) {
        let fake = FakeJvm::new();

        prop_assert_eq!(echo_static(&fake, "(J)J", JValue::Long(value)), JValue::Long(value));
    }

    /// Property: any double bit pattern, NaN payloads included, survives
    #[test]
    fn proptest_double_echo_is_bit_identical(bits in any::<u64>()) {
        let fake = FakeJvm::new();
        let value = f64::from_bits(bits);

        let result = echo_static(&fake, "(D)D", JValue::Double(value));

        match result {
            JValue::Double(d) => prop_assert_eq!(d.to_bits(), bits),
            other => prop_assert!(false, "unexpected result {:?}", other),
        }
    }

    /// Property: any float bit pattern survives
    #[test]
    fn proptest_float_echo_is_bit_identical(bits in any::<u32>()) {
        let fake = FakeJvm::new();
        let value = f32::from_bits(bits);

        let result = echo_static(&fake, "(F)F", JValue::Float(value));

        match result {
            JValue::Float(f) => prop_assert_eq!(f.to_bits(), bits),
            other => prop_assert!(false, "unexpected result {:?}", other),
        }
    }

    /// Property: any char (UTF-16 unit, surrogates included) is returned unchanged
    #[test]
    fn proptest_char_echo_is_identity(value in any::<u16>()) {
        let fake = FakeJvm::new();

        prop_assert_eq!(echo_static(&fake, "(C)C", JValue::Char(value)), JValue::Char(value));
    }

    /// Property: any UTF-8 string round-trips through a Java string
    #[test]
    fn proptest_string_round_trip(text in ".*") {
        let fake = FakeJvm::new();
        let vm = JavaVm::from_handle(fake.vm()).unwrap();
        let env = vm.get_env().unwrap();

        let string = env.new_string(&text).unwrap();

        prop_assert_eq!(env.get_string(string).unwrap(), text.clone());
        prop_assert_eq!(
            env.string_chars(string).unwrap().len(),
            text.encode_utf16().count()
        );
        prop_assert_eq!(fake.pinned_buffer_count(), 0);
    }

    /// Property: any byte vector round-trips through a byte[]
    #[test]
    fn proptest_byte_array_round_trip(bytes in prop::collection::vec(any::<u8>(), 0..4096)) {
        let fake = FakeJvm::new();
        let vm = JavaVm::from_handle(fake.vm()).unwrap();
        let env = vm.get_env().unwrap();

        let array = env.new_byte_array(&bytes).unwrap();

        prop_assert_eq!(env.array_length(array) as usize, bytes.len());
        prop_assert_eq!(env.byte_array_to_vec(array).unwrap(), bytes);
        prop_assert_eq!(fake.pinned_buffer_count(), 0);
    }
}
