// Copyright (C) 2025 Category Labs, Inc.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

pub const MAX_SOURCES: usize = 4;

// The fixed-arity kernels below require all slices to be of equal length.

fn xor_eq1(dst: &mut [u8], a: &[u8]) {
    assert_eq!(dst.len(), a.len());

    for i in 0..dst.len() {
        dst[i] ^= a[i];
    }
}

fn xor_eq2(dst: &mut [u8], a: &[u8], b: &[u8]) {
    assert_eq!(dst.len(), a.len());
    assert_eq!(dst.len(), b.len());

    for i in 0..dst.len() {
        dst[i] ^= a[i] ^ b[i];
    }
}

fn xor_eq3(dst: &mut [u8], a: &[u8], b: &[u8], c: &[u8]) {
    assert_eq!(dst.len(), a.len());
    assert_eq!(dst.len(), b.len());
    assert_eq!(dst.len(), c.len());

    for i in 0..dst.len() {
        dst[i] ^= a[i] ^ b[i] ^ c[i];
    }
}

fn xor_eq4(dst: &mut [u8], a: &[u8], b: &[u8], c: &[u8], d: &[u8]) {
    assert_eq!(dst.len(), a.len());
    assert_eq!(dst.len(), b.len());
    assert_eq!(dst.len(), c.len());
    assert_eq!(dst.len(), d.len());

    for i in 0..dst.len() {
        dst[i] ^= a[i] ^ b[i] ^ c[i] ^ d[i];
    }
}

/// XORs every slice in `src` into `dst`.
///
/// A source shorter than `dst` behaves as if it were zero-extended to `dst.len()`, so the
/// bytes of `dst` past its end are left alone.  A source longer than `dst` panics.
pub fn xor_eq(dst: &mut [u8], src: &[&[u8]]) {
    for chunk in src.chunks(MAX_SOURCES) {
        assert!(chunk.iter().all(|s| s.len() <= dst.len()));

        // The prefix all sources in this chunk cover goes through the wide kernels, the
        // remaining tail of each longer source is folded in on its own.
        let common = chunk.iter().map(|s| s.len()).min().unwrap_or(0);

        let head = &mut dst[..common];

        match chunk.len() {
            1 => xor_eq1(head, &chunk[0][..common]),
            2 => xor_eq2(head, &chunk[0][..common], &chunk[1][..common]),
            3 => xor_eq3(
                head,
                &chunk[0][..common],
                &chunk[1][..common],
                &chunk[2][..common],
            ),
            4 => xor_eq4(
                head,
                &chunk[0][..common],
                &chunk[1][..common],
                &chunk[2][..common],
                &chunk[3][..common],
            ),
            _ => unreachable!("chunks() yields between 1 and MAX_SOURCES slices"),
        }

        for s in chunk {
            if s.len() > common {
                xor_eq1(&mut dst[common..s.len()], &s[common..]);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use rand::{Rng, RngCore};

    use super::xor_eq;

    fn xor_naive(dst: &mut [u8], src: &[&[u8]]) {
        for s in src {
            for (i, byte) in s.iter().enumerate() {
                dst[i] ^= byte;
            }
        }
    }

    #[test]
    fn test_xor_eq_against_naive() {
        let mut rng = rand::thread_rng();

        for _ in 0..1000 {
            let len = rng.gen_range(0..64);

            let sources: Vec<Vec<u8>> = (0..rng.gen_range(0..11))
                .map(|_| {
                    let mut s = vec![0u8; rng.gen_range(0..=len)];
                    rng.fill_bytes(&mut s);
                    s
                })
                .collect();
            let sources: Vec<&[u8]> = sources.iter().map(|s| &s[..]).collect();

            let mut dst = vec![0u8; len];
            rng.fill_bytes(&mut dst);

            let mut expected = dst.clone();
            xor_naive(&mut expected, &sources);

            xor_eq(&mut dst, &sources);

            assert_eq!(dst, expected);
        }
    }

    #[test]
    fn test_xor_eq_is_an_involution() {
        let a: Vec<u8> = (0..32).collect();
        let b: Vec<u8> = (100..132).collect();

        let mut dst = a.clone();
        xor_eq(&mut dst, &[&b[..]]);
        assert_ne!(dst, a);
        xor_eq(&mut dst, &[&b[..]]);
        assert_eq!(dst, a);
    }

    #[test]
    fn test_short_source_leaves_tail_alone() {
        let mut dst = vec![0xffu8; 6];

        xor_eq(&mut dst, &[&[0x0f, 0xf0][..]]);

        assert_eq!(dst, [0xf0, 0x0f, 0xff, 0xff, 0xff, 0xff]);
    }

    #[test]
    #[should_panic]
    fn test_long_source_panics() {
        let mut dst = vec![0u8; 2];

        xor_eq(&mut dst, &[&[1, 2, 3][..]]);
    }
}
