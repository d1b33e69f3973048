//! CSS3 / SVG named colors, in alphabetical order.

use palette::named;
use palette::Srgb;

/// Lookup table for nearest-name matching. Aliases sharing an RGB value
/// (`aqua`/`cyan`, `gray`/`grey`, ...) are both listed; the alphabetically
/// first one wins ties.
pub static CSS_COLORS: [(&str, Srgb<u8>); 147] = [
    ("aliceblue", named::ALICEBLUE),
    ("antiquewhite", named::ANTIQUEWHITE),
    ("aqua", named::AQUA),
    ("aquamarine", named::AQUAMARINE),
    ("azure", named::AZURE),
    ("beige", named::BEIGE),
    ("bisque", named::BISQUE),
    ("black", named::BLACK),
    ("blanchedalmond", named::BLANCHEDALMOND),
    ("blue", named::BLUE),
    ("blueviolet", named::BLUEVIOLET),
    ("brown", named::BROWN),
    ("burlywood", named::BURLYWOOD),
    ("cadetblue", named::CADETBLUE),
    ("chartreuse", named::CHARTREUSE),
    ("chocolate", named::CHOCOLATE),
    ("coral", named::CORAL),
    ("cornflowerblue", named::CORNFLOWERBLUE),
    ("cornsilk", named::CORNSILK),
    ("crimson", named::CRIMSON),
    ("cyan", named::CYAN),
    ("darkblue", named::DARKBLUE),
    ("darkcyan", named::DARKCYAN),
    ("darkgoldenrod", named::DARKGOLDENROD),
    ("darkgray", named::DARKGRAY),
    ("darkgreen", named::DARKGREEN),
    ("darkgrey", named::DARKGREY),
    ("darkkhaki", named::DARKKHAKI),
    ("darkmagenta", named::DARKMAGENTA),
    ("darkolivegreen", named::DARKOLIVEGREEN),
    ("darkorange", named::DARKORANGE),
    ("darkorchid", named::DARKORCHID),
    ("darkred", named::DARKRED),
    ("darksalmon", named::DARKSALMON),
    ("darkseagreen", named::DARKSEAGREEN),
    ("darkslateblue", named::DARKSLATEBLUE),
    ("darkslategray", named::DARKSLATEGRAY),
    ("darkslategrey", named::DARKSLATEGREY),
    ("darkturquoise", named::DARKTURQUOISE),
    ("darkviolet", named::DARKVIOLET),
    ("deeppink", named::DEEPPINK),
    ("deepskyblue", named::DEEPSKYBLUE),
    ("dimgray", named::DIMGRAY),
    ("dimgrey", named::DIMGREY),
    ("dodgerblue", named::DODGERBLUE),
    ("firebrick", named::FIREBRICK),
    ("floralwhite", named::FLORALWHITE),
    ("forestgreen", named::FORESTGREEN),
    ("fuchsia", named::FUCHSIA),
    ("gainsboro", named::GAINSBORO),
    ("ghostwhite", named::GHOSTWHITE),
    ("gold", named::GOLD),
    ("goldenrod", named::GOLDENROD),
    ("gray", named::GRAY),
    ("green", named::GREEN),
    ("greenyellow", named::GREENYELLOW),
    ("grey", named::GREY),
    ("honeydew", named::HONEYDEW),
    ("hotpink", named::HOTPINK),
    ("indianred", named::INDIANRED),
    ("indigo", named::INDIGO),
    ("ivory", named::IVORY),
    ("khaki", named::KHAKI),
    ("lavender", named::LAVENDER),
    ("lavenderblush", named::LAVENDERBLUSH),
    ("lawngreen", named::LAWNGREEN),
    ("lemonchiffon", named::LEMONCHIFFON),
    ("lightblue", named::LIGHTBLUE),
    ("lightcoral", named::LIGHTCORAL),
    ("lightcyan", named::LIGHTCYAN),
    ("lightgoldenrodyellow", named::LIGHTGOLDENRODYELLOW),
    ("lightgray", named::LIGHTGRAY),
    ("lightgreen", named::LIGHTGREEN),
    ("lightgrey", named::LIGHTGREY),
    ("lightpink", named::LIGHTPINK),
    ("lightsalmon", named::LIGHTSALMON),
    ("lightseagreen", named::LIGHTSEAGREEN),
    ("lightskyblue", named::LIGHTSKYBLUE),
    ("lightslategray", named::LIGHTSLATEGRAY),
    ("lightslategrey", named::LIGHTSLATEGREY),
    ("lightsteelblue", named::LIGHTSTEELBLUE),
    ("lightyellow", named::LIGHTYELLOW),
    ("lime", named::LIME),
    ("limegreen", named::LIMEGREEN),
    ("linen", named::LINEN),
    ("magenta", named::MAGENTA),
    ("maroon", named::MAROON),
    ("mediumaquamarine", named::MEDIUMAQUAMARINE),
    ("mediumblue", named::MEDIUMBLUE),
    ("mediumorchid", named::MEDIUMORCHID),
    ("mediumpurple", named::MEDIUMPURPLE),
    ("mediumseagreen", named::MEDIUMSEAGREEN),
    ("mediumslateblue", named::MEDIUMSLATEBLUE),
    ("mediumspringgreen", named::MEDIUMSPRINGGREEN),
    ("mediumturquoise", named::MEDIUMTURQUOISE),
    ("mediumvioletred", named::MEDIUMVIOLETRED),
    ("midnightblue", named::MIDNIGHTBLUE),
    ("mintcream", named::MINTCREAM),
    ("mistyrose", named::MISTYROSE),
    ("moccasin", named::MOCCASIN),
    ("navajowhite", named::NAVAJOWHITE),
    ("navy", named::NAVY),
    ("oldlace", named::OLDLACE),
    ("olive", named::OLIVE),
    ("olivedrab", named::OLIVEDRAB),
    ("orange", named::ORANGE),
    ("orangered", named::ORANGERED),
    ("orchid", named::ORCHID),
    ("palegoldenrod", named::PALEGOLDENROD),
    ("palegreen", named::PALEGREEN),
    ("paleturquoise", named::PALETURQUOISE),
    ("palevioletred", named::PALEVIOLETRED),
    ("papayawhip", named::PAPAYAWHIP),
    ("peachpuff", named::PEACHPUFF),
    ("peru", named::PERU),
    ("pink", named::PINK),
    ("plum", named::PLUM),
    ("powderblue", named::POWDERBLUE),
    ("purple", named::PURPLE),
    ("red", named::RED),
    ("rosybrown", named::ROSYBROWN),
    ("royalblue", named::ROYALBLUE),
    ("saddlebrown", named::SADDLEBROWN),
    ("salmon", named::SALMON),
    ("sandybrown", named::SANDYBROWN),
    ("seagreen", named::SEAGREEN),
    ("seashell", named::SEASHELL),
    ("sienna", named::SIENNA),
    ("silver", named::SILVER),
    ("skyblue", named::SKYBLUE),
    ("slateblue", named::SLATEBLUE),
    ("slategray", named::SLATEGRAY),
    ("slategrey", named::SLATEGREY),
    ("snow", named::SNOW),
    ("springgreen", named::SPRINGGREEN),
    ("steelblue", named::STEELBLUE),
    ("tan", named::TAN),
    ("teal", named::TEAL),
    ("thistle", named::THISTLE),
    ("tomato", named::TOMATO),
    ("turquoise", named::TURQUOISE),
    ("violet", named::VIOLET),
    ("wheat", named::WHEAT),
    ("white", named::WHITE),
    ("whitesmoke", named::WHITESMOKE),
    ("yellow", named::YELLOW),
    ("yellowgreen", named::YELLOWGREEN),
];
