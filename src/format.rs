//! TOON Wire Format
//!
//! This module documents the text dialect this crate reads and writes.
//!
//! # Overview
//!
//! A document is one record: a sequence of `key : value` bindings, one per
//! line, with nesting expressed by indentation. There are no braces around
//! records, no quotes around keys, and no escape sequences inside strings.
//!
//! # Records
//!
//! A scalar binding puts a single space on both sides of the colon:
//!
//! ```text
//! id : 123
//! name : Ada Lovelace
//! active : true
//! score : 98.5
//! ```
//!
//! A nested record binding leaves the value side empty and indents its
//! children exactly two more spaces per level:
//!
//! ```text
//! server :
//!   host : localhost
//!   limits :
//!     timeout : 30
//! ```
//!
//! **Rules**:
//! - Keys keep the order they were bound in; output is deterministic for
//!   struct and [`RecordMap`](crate::RecordMap) sources
//! - A repeated key replaces the earlier value but keeps its position
//! - Every emitted line ends with a newline, including the last
//!
//! # Scalars
//!
//! | Kind | Syntax | Example |
//! |---------|------------------------------|--------------------|
//! | Null | `null` | `value : null` |
//! | Boolean | `true` or `false` | `active : true` |
//! | Integer | decimal digits, optional `-` | `count : 42` |
//! | Float | decimal digits with `.` | `price : 19.99` |
//! | String | bare or `"quoted"` | `name : Ada` |
//!
//! # Strings and Quoting
//!
//! Strings are bare by default. The encoder wraps a string in double quotes
//! when leaving it bare would change how it reads back:
//!
//! - Empty string, or equal to `true`, `false`, or `null`
//! - Contains any digit (a bare digit-bearing token reads as a number)
//! - Contains `:`  `,`  `{`  `}`  `[`  `]`  `"`  `|`  `\`  `-` or a tab
//! - Starts or ends with a space
//!
//! ```text
//! name : Ada Lovelace
//! flag : "true"
//! id : "42"
//! path : "a,b:c"
//! ```
//!
//! There are no escape sequences. Quotes wrap the string; the decoder strips
//! at most one leading and one trailing quote and takes the rest verbatim.
//! Inner quotes survive unescaped, which also means a string may not contain
//! a newline.
//!
//! # Array Shapes
//!
//! An array binding annotates its key with the element count. The encoder
//! picks the tightest of four shapes from the contents; the decoder
//! recognizes each shape from the header alone.
//!
//! ## Empty
//!
//! ```text
//! tags[0]:
//! ```
//!
//! ## Inline
//!
//! All elements scalar and, nulls aside, of one kind:
//!
//! ```text
//! nums[3]: 1,2,3
//! opts[4]: 1,null,3,null
//! ```
//!
//! Mixed scalar kinds (a bool next to a string, say) are heterogeneous and
//! take the block shape below.
//!
//! ## Tabular
//!
//! All elements records whose values are all scalar. The header carries the
//! field list; each row is one element, indented one level past the header:
//!
//! ```text
//! team[2]{name,age,role}:
//!   Alice,30,admin
//!   Bob,25,null
//! ```
//!
//! - Fields are the union of the element keys, in first-seen order
//! - An element missing a field contributes a literal `null` cell
//! - Rows may use `|` or a tab instead of commas; the alternate separator
//!   sits in the header between the count and the closing bracket, and the
//!   field list uses it too: `rows[2|]{a|b}:`
//!
//! ## Block
//!
//! Anything else. Each element is a dash line indented one level past the
//! header:
//!
//! ```text
//! items[3]:
//!   - 1
//!   - text
//!   - [2]: 4,5
//! ```
//!
//! A nested array element repeats an array header after the dash. A record
//! element puts its first binding on the dash line and indents the rest two
//! extra spaces:
//!
//! ```text
//! points[2]:
//!   - x : 1
//!     y : 2
//!   - x : 3
//!     y : 4
//! ```
//!
//! Record elements are a write-only shape: the decoder treats each dash
//! tail as one scalar token, so `- x : 1` is classified as a digit-bearing
//! token and fails with a number-format error, and a digit-free tail like
//! `- name : ada` degrades to the string `name : ada`. Keep block arrays to
//! scalars and nested arrays when the data must round-trip.
//!
//! # Decoding
//!
//! The decoder is lenient about lines and strict about counts:
//!
//! - Blank lines, lines without a `:`, and lines indented deeper than their
//!   context are skipped
//! - Unknown keys decode fine into a [`RecordMap`](crate::RecordMap) and are
//!   ignored by typed destinations
//! - Inside a block array, a line that does not start with `-` is skipped
//!   and not counted
//! - A declared count must be met: input ending early is an error, and an
//!   inline value list with the wrong length is an error
//! - A bracket pair with a non-numeric count is an error
//!
//! Scalar tokens are classified by shape: `true`/`false`, `null`, empty,
//! then numbers (any bare digit-bearing token must parse as one), then
//! strings. A token with an unquoted comma is a nested list of classified
//! parts.
//!
//! # Limitations
//!
//! - Map keys must be strings
//! - A document is one record; a bare scalar or array cannot be a document
//! - Strings cannot contain newlines
//! - Nesting is capped at 64 levels on decode
//! - Enum support covers unit variants only (encoded as the variant name)

// This module contains only documentation; no implementation code
