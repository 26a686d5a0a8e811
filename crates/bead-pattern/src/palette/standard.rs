//! The built-in bead manufacturer color table.
//!
//! Codes follow the manufacturer's catalogue numbering; colors are the
//! advertised sRGB values. Table order is catalogue order and doubles as the
//! matcher's tie-break order, so entries are never reordered.

/// `(code, [r, g, b])` per catalogue entry.
pub(super) const STANDARD_BEADS: &[(&str, [u8; 3])] = &[
    ("C01", [255, 255, 255]), // white
    ("C02", [238, 231, 201]), // cream
    ("C03", [250, 215, 0]),   // yellow
    ("C04", [255, 126, 20]),  // orange
    ("C05", [201, 27, 43]),   // red
    ("C06", [243, 154, 178]), // pink
    ("C07", [110, 57, 139]),  // purple
    ("C08", [39, 74, 160]),   // blue
    ("C09", [95, 162, 219]),  // light blue
    ("C10", [36, 126, 68]),   // green
    ("C11", [119, 192, 88]),  // light green
    ("C12", [112, 78, 58]),   // brown
    ("C13", [255, 90, 36]),   // vermilion
    ("C14", [10, 10, 10]),    // black
    ("C15", [63, 103, 180]),  // royal blue
    ("C16", [146, 40, 54]),   // wine red
    ("C17", [130, 130, 130]), // grey
    ("C18", [76, 47, 39]),    // dark brown
    ("C19", [190, 68, 36]),   // rust
    ("C20", [131, 31, 41]),   // burgundy
    ("C21", [164, 117, 77]),  // light brown
    ("C22", [217, 44, 56]),   // signal red
    ("C26", [249, 165, 190]), // flesh
    ("C27", [228, 221, 197]), // ivory
    ("C28", [26, 66, 40]),    // dark green
    ("C29", [199, 38, 80]),   // raspberry
    ("C30", [113, 48, 69]),   // bordeaux
    ("C31", [144, 188, 205]), // turquoise
    ("C32", [236, 94, 129]),  // fuchsia
    ("C33", [151, 100, 50]),  // ochre
    ("C43", [243, 192, 49]),  // gold yellow
    ("C44", [236, 59, 73]),   // pastel red
    ("C45", [171, 131, 182]), // pastel purple
    ("C46", [96, 155, 109]),  // pastel green
    ("C47", [223, 140, 84]),  // apricot
    ("C48", [180, 100, 115]), // old rose
    ("C49", [104, 194, 206]), // azure
    ("C60", [125, 75, 48]),   // teddy brown
    ("C70", [87, 87, 87]),    // dark grey
    ("C71", [190, 190, 190]), // light grey
];
