#![allow(non_snake_case)]

use super::*;
use jnishim_ffi::testing::FakeJvm;
use test_case::test_case;

fn env_of(fake: &FakeJvm) -> Env<'_> {
    unsafe { Env::new(fake.vm(), fake.env()) }
}

#[test_case(ReleaseMode::CopyBackAndFree, vec![5, 5, 5] ; "copy back")]
#[test_case(ReleaseMode::Commit, vec![5, 5, 5] ; "commit")]
#[test_case(ReleaseMode::Abort, vec![0, 0, 0] ; "abort")]
fn ByteArrayElements___dropped___applies_release_mode(mode: ReleaseMode, expected: Vec<i8>) {
    let fake = FakeJvm::new();
    let env = env_of(&fake);
    let array = env.new_byte_array(&[0, 0, 0]).unwrap();

    {
        let mut elems = env.byte_array_elements(array, mode).unwrap();
        assert_eq!(elems.mode(), mode);
        elems.fill(5);
    }

    assert_eq!(fake.byte_array_contents(array), Some(expected));
    assert_eq!(fake.pinned_buffer_count(), 0);
}

#[test]
fn ByteArrayElements___commit___copies_back_while_pinned() {
    let fake = FakeJvm::new();
    let env = env_of(&fake);
    let array = env.new_byte_array(&[1, 2]).unwrap();

    let mut elems = env.byte_array_elements(array, ReleaseMode::Abort).unwrap();
    elems[0] = 9;
    elems.commit();
    elems[1] = 9;

    assert_eq!(fake.byte_array_contents(array), Some(vec![9, 2]));
    assert_eq!(fake.pinned_buffer_count(), 1);
    drop(elems);
    assert_eq!(fake.byte_array_contents(array), Some(vec![9, 2]));
    assert_eq!(fake.pinned_buffer_count(), 0);
}

#[test]
fn ByteArrayElements___set_mode___overrides_initial_mode() {
    let fake = FakeJvm::new();
    let env = env_of(&fake);
    let array = env.new_byte_array(&[0]).unwrap();

    let mut elems = env.byte_array_elements(array, ReleaseMode::Abort).unwrap();
    elems[0] = -1;
    elems.set_mode(ReleaseMode::CopyBackAndFree);
    drop(elems);

    assert_eq!(fake.byte_array_contents(array), Some(vec![-1]));
}

#[test]
fn ByteArrayElements___null_array___is_invalid_argument() {
    let fake = FakeJvm::new();
    let env = env_of(&fake);

    let result = env.byte_array_elements(std::ptr::null_mut(), ReleaseMode::Abort);

    assert!(result.is_err());
}

#[test]
fn StringChars___dropped___releases_buffer() {
    let fake = FakeJvm::new();
    let env = env_of(&fake);
    let string = env.new_string("hi").unwrap();

    let chars = env.string_chars(string).unwrap();
    assert_eq!(&*chars, &[b'h' as u16, b'i' as u16]);
    assert_eq!(fake.pinned_buffer_count(), 1);
    drop(chars);

    assert_eq!(fake.pinned_buffer_count(), 0);
}
