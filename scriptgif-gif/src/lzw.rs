//! LZW compression of 4-bit pixel data
//!
//! The dictionary is a trie of pixel strings stored in a flat arena: each
//! node holds its code and the arena index of its child for each of the
//! 16 possible next pixels. Codes are packed least-significant bit first
//! and framed into sub-blocks.

use std::io::{self, Write};

use crate::blocks::SubBlockWriter;

/// Bits per pixel value, written before the image data
pub const MIN_CODE_SIZE: u8 = 4;
/// Resets the dictionary
pub const CLEAR_CODE: u16 = 1 << MIN_CODE_SIZE;
/// Ends the image data
pub const END_CODE: u16 = CLEAR_CODE + 1;
/// Dictionary size limit (12-bit codes)
pub const MAX_CODES: u16 = 0x1000;

const FIRST_CODE: u16 = END_CODE + 1;
const INITIAL_CODE_WIDTH: u8 = MIN_CODE_SIZE + 1;
const ALPHABET: usize = 1 << MIN_CODE_SIZE;
const ROOT: usize = 0;

#[derive(Debug, Clone)]
struct Node {
    code: u16,
    children: [Option<usize>; ALPHABET],
}

impl Node {
    fn new(code: u16) -> Self {
        Self {
            code,
            children: [None; ALPHABET],
        }
    }
}

/// Arena-backed dictionary trie
#[derive(Debug, Clone)]
struct Trie {
    nodes: Vec<Node>,
    next_code: u16,
}

impl Trie {
    fn new() -> Self {
        let mut trie = Self {
            nodes: Vec::with_capacity(usize::from(MAX_CODES)),
            next_code: FIRST_CODE,
        };
        trie.reset();
        trie
    }

    /// Back to the root plus one node per single pixel
    fn reset(&mut self) {
        self.nodes.clear();
        let mut root = Node::new(0);
        for pixel in 0..ALPHABET {
            root.children[pixel] = Some(pixel + 1);
        }
        self.nodes.push(root);
        self.nodes.extend((0..ALPHABET as u16).map(Node::new));
        self.next_code = FIRST_CODE;
    }

    fn leaf(pixel: u8) -> usize {
        usize::from(pixel) + 1
    }

    fn child(&self, node: usize, pixel: u8) -> Option<usize> {
        self.nodes[node].children[usize::from(pixel)]
    }

    fn code(&self, node: usize) -> u16 {
        self.nodes[node].code
    }

    fn is_full(&self) -> bool {
        self.next_code >= MAX_CODES
    }

    fn insert(&mut self, node: usize, pixel: u8) {
        let index = self.nodes.len();
        self.nodes.push(Node::new(self.next_code));
        self.nodes[node].children[usize::from(pixel)] = Some(index);
        self.next_code += 1;
    }
}

/// Packs variable-width codes LSB-first into sub-blocks
struct BitPacker<'a, W: Write> {
    blocks: SubBlockWriter<'a, W>,
    acc: u32,
    bits: u8,
}

impl<'a, W: Write> BitPacker<'a, W> {
    fn new(out: &'a mut W) -> Self {
        Self {
            blocks: SubBlockWriter::new(out),
            acc: 0,
            bits: 0,
        }
    }

    fn put(&mut self, code: u16, width: u8) -> io::Result<()> {
        self.acc |= u32::from(code) << self.bits;
        self.bits += width;
        while self.bits >= 8 {
            self.blocks.push(self.acc as u8)?;
            self.acc >>= 8;
            self.bits -= 8;
        }
        Ok(())
    }

    fn finish(mut self) -> io::Result<()> {
        if self.bits > 0 {
            self.blocks.push(self.acc as u8)?;
        }
        self.blocks.finish()
    }
}

/// Write the minimum code size byte and the compressed image data.
///
/// Only the low four bits of each pixel are used.
pub fn compress<W, I>(out: &mut W, pixels: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = u8>,
{
    out.write_all(&[MIN_CODE_SIZE])?;

    let mut trie = Trie::new();
    let mut packer = BitPacker::new(out);
    let mut width = INITIAL_CODE_WIDTH;
    let mut node = ROOT;

    packer.put(CLEAR_CODE, width)?;
    for pixel in pixels {
        let pixel = pixel & 0x0F;
        if let Some(child) = trie.child(node, pixel) {
            node = child;
            continue;
        }

        packer.put(trie.code(node), width)?;
        if trie.is_full() {
            packer.put(CLEAR_CODE, width)?;
            trie.reset();
            width = INITIAL_CODE_WIDTH;
        } else {
            if trie.next_code == 1 << width {
                width += 1;
            }
            trie.insert(node, pixel);
        }
        node = Trie::leaf(pixel);
    }

    if node != ROOT {
        packer.put(trie.code(node), width)?;
    }
    packer.put(END_CODE, width)?;
    packer.finish()
}
