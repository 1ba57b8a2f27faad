use crate::tokenize::tokenize_c_style;
use crate::{CommentConfig, LanguageDefinition, PaletteIndex};

/// Languages that ship with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinLanguage {
    /// C++ (hand-written tokenizer).
    CPlusPlus,
    /// C (hand-written tokenizer).
    C,
    /// HLSL shaders.
    Hlsl,
    /// GLSL shaders.
    Glsl,
    /// SQL (case-insensitive).
    Sql,
    /// AngelScript.
    AngelScript,
    /// Lua.
    Lua,
}

impl BuiltinLanguage {
    /// Every built-in language.
    pub const ALL: [BuiltinLanguage; 7] = [
        BuiltinLanguage::CPlusPlus,
        BuiltinLanguage::C,
        BuiltinLanguage::Hlsl,
        BuiltinLanguage::Glsl,
        BuiltinLanguage::Sql,
        BuiltinLanguage::AngelScript,
        BuiltinLanguage::Lua,
    ];

    /// Build the definition for this language.
    pub fn definition(self) -> LanguageDefinition {
        match self {
            BuiltinLanguage::CPlusPlus => LanguageDefinition::cplusplus(),
            BuiltinLanguage::C => LanguageDefinition::c(),
            BuiltinLanguage::Hlsl => LanguageDefinition::hlsl(),
            BuiltinLanguage::Glsl => LanguageDefinition::glsl(),
            BuiltinLanguage::Sql => LanguageDefinition::sql(),
            BuiltinLanguage::AngelScript => LanguageDefinition::angel_script(),
            BuiltinLanguage::Lua => LanguageDefinition::lua(),
        }
    }
}

const C_STYLE_COMMENTS: (&str, &str, &str) = ("//", "/*", "*/");

const DOUBLE_QUOTED_STRING: &str = r#"L?"(\\.|[^"])*""#;
const SINGLE_QUOTED_STRING: &str = r"'[^']*'";
const CHAR_LITERAL: &str = r"'\\?[^']'";
const FLOAT_NUMBER: &str = r"[+-]?([0-9]+([.][0-9]*)?|[.][0-9]+)([eE][+-]?[0-9]+)?[fF]?";
const INT_NUMBER: &str = r"[+-]?[0-9]+[Uu]?[lL]?[lL]?";
const OCTAL_NUMBER: &str = r"0[0-7]+[Uu]?[lL]?[lL]?";
const HEX_NUMBER: &str = r"0[xX][0-9a-fA-F]+[uU]?[lL]?[lL]?";
const IDENTIFIER: &str = r"[a-zA-Z_][a-zA-Z0-9_]*";
const PUNCTUATION: &str = r"[\[\]\{\}!%\^&\*\(\)\-\+=~\|<>\?/;,\.]";
const PREPROCESSOR: &str = r"[ \t]*#[ \t]*[a-zA-Z_]+";

const C_LIBRARY_FUNCTIONS: &[&str] = &[
    "abort", "abs", "acos", "asin", "atan", "atexit", "atof", "atoi", "atol", "ceil", "clock",
    "cosh", "ctime", "div", "exit", "fabs", "floor", "fmod", "getchar", "getenv", "isalnum",
    "isalpha", "isdigit", "isgraph", "ispunct", "isspace", "isupper", "kbhit", "log10", "log2",
    "log", "memcmp", "modf", "pow", "putchar", "putenv", "puts", "rand", "remove", "rename",
    "sinh", "sqrt", "srand", "strcat", "strcmp", "strerror", "time", "tolower", "toupper",
];

const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "_Alignas", "_Alignof", "_Atomic", "_Bool",
    "_Complex", "_Generic", "_Imaginary", "_Noreturn", "_Static_assert", "_Thread_local",
];

impl LanguageDefinition {
    fn c_like(name: &str) -> Self {
        let (line, block_start, block_end) = C_STYLE_COMMENTS;
        LanguageDefinition::new(name)
            .with_comments(CommentConfig::line_and_block(line, block_start, block_end))
    }

    fn with_shader_rules(self) -> Self {
        self.with_rule(PREPROCESSOR, PaletteIndex::Preprocessor)
            .with_rule(DOUBLE_QUOTED_STRING, PaletteIndex::String)
            .with_rule(CHAR_LITERAL, PaletteIndex::CharLiteral)
            .with_rule(FLOAT_NUMBER, PaletteIndex::Number)
            .with_rule(INT_NUMBER, PaletteIndex::Number)
            .with_rule(OCTAL_NUMBER, PaletteIndex::Number)
            .with_rule(HEX_NUMBER, PaletteIndex::Number)
            .with_rule(IDENTIFIER, PaletteIndex::Identifier)
            .with_rule(PUNCTUATION, PaletteIndex::Punctuation)
    }

    /// C++ with the hand-written C-style tokenizer.
    pub fn cplusplus() -> Self {
        LanguageDefinition::c_like("C++")
            .with_keywords([
                "alignas", "alignof", "and", "and_eq", "asm", "atomic_cancel", "atomic_commit",
                "atomic_noexcept", "auto", "bitand", "bitor", "bool", "break", "case", "catch",
                "char", "char16_t", "char32_t", "class", "compl", "concept", "const", "constexpr",
                "const_cast", "continue", "decltype", "default", "delete", "do", "double",
                "dynamic_cast", "else", "enum", "explicit", "export", "extern", "false", "float",
                "for", "friend", "goto", "if", "import", "inline", "int", "long", "module",
                "mutable", "namespace", "new", "noexcept", "not", "not_eq", "nullptr", "operator",
                "or", "or_eq", "private", "protected", "public", "register", "reinterpret_cast",
                "requires", "return", "short", "signed", "sizeof", "static", "static_assert",
                "static_cast", "struct", "switch", "synchronized", "template", "this",
                "thread_local", "throw", "true", "try", "typedef", "typeid", "typename", "union",
                "unsigned", "using", "virtual", "void", "volatile", "wchar_t", "while", "xor",
                "xor_eq",
            ])
            .with_builtin_functions(C_LIBRARY_FUNCTIONS.iter().copied())
            .with_builtin_functions([
                "printf", "sprintf", "snprintf", "std", "string", "vector", "map",
                "unordered_map", "set", "unordered_set", "min", "max",
            ])
            .with_tokenizer(tokenize_c_style)
    }

    /// C with the hand-written C-style tokenizer.
    pub fn c() -> Self {
        LanguageDefinition::c_like("C")
            .with_keywords(C_KEYWORDS.iter().copied())
            .with_builtin_functions(C_LIBRARY_FUNCTIONS.iter().copied())
            .with_tokenizer(tokenize_c_style)
    }

    /// HLSL with intrinsic documentation.
    pub fn hlsl() -> Self {
        let vector_types = ["bool", "double", "float", "int", "uint", "dword", "half"]
            .into_iter()
            .flat_map(|ty| (1..=4).map(move |n| format!("{ty}{n}")));
        let matrix_types = ["float", "half"].into_iter().flat_map(|ty| {
            (1..=4).flat_map(move |rows| (1..=4).map(move |cols| format!("{ty}{cols}x{rows}")))
        });

        LanguageDefinition::c_like("HLSL")
            .with_keywords([
                "AppendStructuredBuffer", "asm", "asm_fragment", "BlendState", "bool", "break",
                "Buffer", "ByteAddressBuffer", "case", "cbuffer", "centroid", "class",
                "column_major", "compile", "compile_fragment", "CompileShader", "const",
                "continue", "ComputeShader", "ConsumeStructuredBuffer", "default",
                "DepthStencilState", "DepthStencilView", "discard", "do", "double",
                "DomainShader", "dword", "else", "export", "extern", "false", "float", "for",
                "fxgroup", "GeometryShader", "groupshared", "half", "Hullshader", "if", "in",
                "inline", "inout", "InputPatch", "int", "interface", "line", "lineadj", "linear",
                "LineStream", "matrix", "min16float", "min10float", "min16int", "min12int",
                "min16uint", "namespace", "nointerpolation", "noperspective", "NULL", "out",
                "OutputPatch", "packoffset", "pass", "pixelfragment", "PixelShader", "point",
                "PointStream", "precise", "RasterizerState", "RenderTargetView", "return",
                "register", "row_major", "RWBuffer", "RWByteAddressBuffer", "RWStructuredBuffer",
                "RWTexture1D", "RWTexture1DArray", "RWTexture2D", "RWTexture2DArray",
                "RWTexture3D", "sample", "sampler", "SamplerState", "SamplerComparisonState",
                "shared", "snorm", "stateblock", "stateblock_state", "static", "string", "struct",
                "switch", "StructuredBuffer", "tbuffer", "technique", "technique10",
                "technique11", "texture", "Texture1D", "Texture1DArray", "Texture2D",
                "Texture2DArray", "Texture2DMS", "Texture2DMSArray", "Texture3D", "TextureCube",
                "TextureCubeArray", "true", "typedef", "triangle", "triangleadj",
                "TriangleStream", "uint", "uniform", "unorm", "unsigned", "vector",
                "vertexfragment", "VertexShader", "void", "volatile", "while",
            ])
            .with_keywords(vector_types)
            .with_keywords(matrix_types)
            .with_identifiers([
                ("abort", "Terminates the current draw or dispatch call being executed."),
                ("abs", "Absolute value (per component)."),
                ("acos", "Returns the arccosine of each component of x."),
                ("all", "Test if all components of x are nonzero."),
                ("any", "Test if any component of x is nonzero."),
                ("asfloat", "Convert the input type to a float."),
                ("asin", "Returns the arcsine of each component of x."),
                ("asint", "Convert the input type to an integer."),
                ("asuint", "Convert the input type to an unsigned integer."),
                ("atan", "Returns the arctangent of x."),
                ("atan2", "Returns the arctangent of of two values (x,y)."),
                ("ceil", "Returns the smallest integer which is greater than or equal to x."),
                ("clamp", "Clamps x to the range [min, max]."),
                ("clip", "Discards the current pixel, if any component of x is less than zero."),
                ("cos", "Returns the cosine of x."),
                ("cosh", "Returns the hyperbolic cosine of x."),
                ("cross", "Returns the cross product of two 3D vectors."),
                ("ddx", "Returns the partial derivative of x with respect to the screen-space x-coordinate."),
                ("ddy", "Returns the partial derivative of x with respect to the screen-space y-coordinate."),
                ("degrees", "Converts x from radians to degrees."),
                ("determinant", "Returns the determinant of the square matrix m."),
                ("distance", "Returns the distance between two points."),
                ("dot", "Returns the dot product of two vectors."),
                ("exp", "Returns the base-e exponent."),
                ("exp2", "Base 2 exponent (per component)."),
                ("floor", "Returns the greatest integer which is less than or equal to x."),
                ("fmod", "Returns the floating point remainder of x/y."),
                ("frac", "Returns the fractional part of x."),
                ("length", "Returns the length of the vector v."),
                ("lerp", "Returns x + s(y - x)."),
                ("log", "Returns the base-e logarithm of x."),
                ("log2", "Returns the base-2 logarithm of x."),
                ("max", "Selects the greater of x and y."),
                ("min", "Selects the lesser of x and y."),
                ("mul", "Performs matrix multiplication using x and y."),
                ("normalize", "Normalizes the specified floating-point vector according to x / length(x)."),
                ("pow", "Returns x^n."),
                ("radians", "Converts x from degrees to radians."),
                ("reflect", "Returns a reflection vector."),
                ("rsqrt", "Returns 1 / sqrt(x)."),
                ("saturate", "Clamps x to the range [0, 1]."),
                ("sin", "Returns the sine of x."),
                ("smoothstep", "Returns a smooth Hermite interpolation between 0 and 1, if x is in the range [min, max]."),
                ("sqrt", "Square root (per component)."),
                ("step", "Returns (x >= a) ? 1 : 0."),
                ("tan", "Returns the tangent of x."),
                ("transpose", "Transposes the specified matrix."),
            ])
            .with_shader_rules()
    }

    /// GLSL with built-in function documentation.
    pub fn glsl() -> Self {
        LanguageDefinition::c_like("GLSL")
            .with_keywords(C_KEYWORDS.iter().copied())
            .with_keywords([
                "attribute", "uniform", "varying", "layout", "centroid", "flat", "smooth",
                "noperspective", "patch", "sample", "subroutine", "in", "out", "inout", "bool",
                "true", "false", "invariant", "mat2", "mat3", "mat4", "dmat2", "dmat3", "dmat4",
                "mat2x2", "mat2x3", "mat2x4", "dmat2x2", "dmat2x3", "dmat2x4", "mat3x2", "mat3x3",
                "mat3x4", "dmat3x2", "dmat3x3", "dmat3x4", "mat4x2", "mat4x3", "mat4x4",
                "dmat4x2", "dmat4x3", "dmat4x4", "vec2", "vec3", "vec4", "ivec2", "ivec3",
                "ivec4", "bvec2", "bvec3", "bvec4", "dvec2", "dvec3", "dvec4", "uint", "uvec2",
                "uvec3", "uvec4", "lowp", "mediump", "highp", "precision", "sampler1D",
                "sampler2D", "sampler3D", "samplerCube", "sampler1DShadow", "sampler2DShadow",
                "samplerCubeShadow", "sampler1DArray", "sampler2DArray", "sampler1DArrayShadow",
                "sampler2DArrayShadow", "isampler1D", "isampler2D", "isampler3D", "isamplerCube",
                "isampler1DArray", "isampler2DArray", "usampler1D", "usampler2D", "usampler3D",
                "usamplerCube", "usampler1DArray", "usampler2DArray", "sampler2DRect",
                "sampler2DRectShadow", "isampler2DRect", "usampler2DRect", "samplerBuffer",
                "isamplerBuffer", "usamplerBuffer", "sampler2DMS", "isampler2DMS",
                "usampler2DMS", "sampler2DMSArray", "isampler2DMSArray", "usampler2DMSArray",
                "samplerCubeArray", "samplerCubeArrayShadow", "isamplerCubeArray",
                "usamplerCubeArray",
            ])
            .with_identifiers([
                ("radians", "Converts x from degrees to radians."),
                ("degrees", "Converts x from radians to degrees."),
                ("sin", "Returns the sine of x."),
                ("cos", "Returns the cosine of x."),
                ("tan", "Returns the tangent of x."),
                ("asin", "Returns the arcsine of each component of x."),
                ("acos", "Returns the arccosine of each component of x."),
                ("atan", "Returns the arctangent of x."),
                ("pow", "Returns x^n."),
                ("exp", "Returns the base-e exponent."),
                ("exp2", "Base 2 exponent (per component)."),
                ("log", "Returns the base-e logarithm of x."),
                ("log2", "Returns the base-2 logarithm of x."),
                ("sqrt", "Square root (per component)."),
                ("inversesqrt", "Returns rcp(sqrt(x))."),
                ("abs", "Absolute value (per component)."),
                ("sign", "Computes the sign of x."),
                ("floor", "Returns the greatest integer which is less than or equal to x."),
                ("ceil", "Returns the smallest integer which is greater than or equal to x."),
                ("fract", "Returns the fractional part of x."),
                ("mod", "Modulus. Returns x - y * floor(x / y)."),
                ("min", "Selects the lesser of x and y."),
                ("max", "Selects the greater of x and y."),
                ("clamp", "Clamps x to the range [min, max]."),
                ("mix", "Returns x * (1 - a) + y * a."),
                ("step", "Returns (x >= a) ? 1 : 0."),
                ("smoothstep", "Returns a smooth Hermite interpolation between 0 and 1."),
                ("length", "Returns the length of the vector v."),
                ("distance", "Returns the distance between two points."),
                ("dot", "Returns the dot product of two vectors."),
                ("cross", "Returns the cross product of two 3D vectors."),
                ("normalize", "Returns a vector in the same direction as x with a length of 1."),
                ("reflect", "Returns a reflection vector."),
                ("texture", "Retrieves texels from a texture."),
                ("texelFetch", "Performs a lookup of a single texel within a texture."),
            ])
            .with_shader_rules()
    }

    /// SQL: case-insensitive, single-quoted strings, no indentation inheritance.
    pub fn sql() -> Self {
        LanguageDefinition::c_like("SQL")
            .with_keywords([
                "ADD", "EXCEPT", "PERCENT", "ALL", "EXEC", "PLAN", "ALTER", "EXECUTE",
                "PRECISION", "AND", "EXISTS", "PRIMARY", "ANY", "EXIT", "PRINT", "AS", "FETCH",
                "PROC", "ASC", "FILE", "PROCEDURE", "AUTHORIZATION", "FILLFACTOR", "PUBLIC",
                "BACKUP", "FOR", "RAISERROR", "BEGIN", "FOREIGN", "READ", "BETWEEN", "FREETEXT",
                "READTEXT", "BREAK", "FREETEXTTABLE", "RECONFIGURE", "BROWSE", "FROM",
                "REFERENCES", "BULK", "FULL", "REPLICATION", "BY", "FUNCTION", "RESTORE",
                "CASCADE", "GOTO", "RESTRICT", "CASE", "GRANT", "RETURN", "CHECK", "GROUP",
                "REVOKE", "CHECKPOINT", "HAVING", "RIGHT", "CLOSE", "HOLDLOCK", "ROLLBACK",
                "CLUSTERED", "IDENTITY", "ROWCOUNT", "COALESCE", "IDENTITY_INSERT", "ROWGUIDCOL",
                "COLLATE", "IDENTITYCOL", "RULE", "COLUMN", "IF", "SAVE", "COMMIT", "IN",
                "SCHEMA", "COMPUTE", "INDEX", "SELECT", "CONSTRAINT", "INNER", "SESSION_USER",
                "CONTAINS", "INSERT", "SET", "CONTAINSTABLE", "INTERSECT", "SETUSER", "CONTINUE",
                "INTO", "SHUTDOWN", "CONVERT", "IS", "SOME", "CREATE", "JOIN", "STATISTICS",
                "CROSS", "KEY", "SYSTEM_USER", "CURRENT", "KILL", "TABLE", "CURRENT_DATE",
                "LEFT", "TEXTSIZE", "CURRENT_TIME", "LIKE", "THEN", "CURRENT_TIMESTAMP",
                "LINENO", "TO", "CURRENT_USER", "LOAD", "TOP", "CURSOR", "NATIONAL", "TRAN",
                "DATABASE", "NOCHECK", "TRANSACTION", "DBCC", "NONCLUSTERED", "TRIGGER",
                "DEALLOCATE", "NOT", "TRUNCATE", "DECLARE", "NULL", "TSEQUAL", "DEFAULT",
                "NULLIF", "UNION", "DELETE", "OF", "UNIQUE", "DENY", "OFF", "UPDATE", "DESC",
                "OFFSETS", "UPDATETEXT", "DISK", "ON", "USE", "DISTINCT", "OPEN", "USER",
                "DISTRIBUTED", "OPENDATASOURCE", "VALUES", "DOUBLE", "OPENQUERY", "VARYING",
                "DROP", "OPENROWSET", "VIEW", "DUMMY", "OPENXML", "WAITFOR", "DUMP", "OPTION",
                "WHEN", "ELSE", "OR", "WHERE", "END", "ORDER", "WHILE", "ERRLVL", "OUTER",
                "WITH", "ESCAPE", "OVER", "WRITETEXT",
            ])
            .with_builtin_functions([
                "ABS", "ACOS", "ADD_MONTHS", "ASCII", "ASIN", "ATAN", "ATAN2", "AVG", "CAST",
                "CEIL", "CHR", "COALESCE", "CONCAT", "CONVERT", "COS", "COSH", "COUNT",
                "CURRENT_DATE", "CURRENT_TIMESTAMP", "DECODE", "DENSE_RANK", "EXP", "EXTRACT",
                "FIRST_VALUE", "FLOOR", "GREATEST", "INITCAP", "INSTR", "LAG", "LAST_DAY",
                "LAST_VALUE", "LEAD", "LEAST", "LENGTH", "LISTAGG", "LN", "LOG", "LOWER",
                "LPAD", "LTRIM", "MAX", "MEDIAN", "MIN", "MOD", "NULLIF", "NVL", "NVL2",
                "POWER", "RANK", "REPLACE", "ROUND", "ROWNUM", "RPAD", "RTRIM", "SIGN", "SIN",
                "SQRT", "STDDEV", "SUBSTR", "SUM", "SYSDATE", "TAN", "TANH", "TO_CHAR",
                "TO_DATE", "TO_NUMBER", "TRANSLATE", "TRIM", "TRUNC", "UPPER", "VARIANCE",
            ])
            .with_rule(DOUBLE_QUOTED_STRING, PaletteIndex::String)
            .with_rule(SINGLE_QUOTED_STRING, PaletteIndex::String)
            .with_rule(FLOAT_NUMBER, PaletteIndex::Number)
            .with_rule(INT_NUMBER, PaletteIndex::Number)
            .with_rule(OCTAL_NUMBER, PaletteIndex::Number)
            .with_rule(HEX_NUMBER, PaletteIndex::Number)
            .with_rule(IDENTIFIER, PaletteIndex::Identifier)
            .with_rule(PUNCTUATION, PaletteIndex::Punctuation)
            .case_insensitive()
            .without_auto_indentation()
    }

    /// AngelScript.
    pub fn angel_script() -> Self {
        LanguageDefinition::c_like("AngelScript")
            .with_keywords([
                "and", "abstract", "auto", "bool", "break", "case", "cast", "class", "const",
                "continue", "default", "do", "double", "else", "enum", "false", "final", "float",
                "for", "from", "funcdef", "function", "get", "if", "import", "in", "inout", "int",
                "interface", "int8", "int16", "int32", "int64", "is", "mixin", "namespace", "not",
                "null", "or", "out", "override", "private", "protected", "return", "set",
                "shared", "super", "switch", "this", "true", "typedef", "uint", "uint8", "uint16",
                "uint32", "uint64", "void", "while", "xor",
            ])
            .with_builtin_functions([
                "cos", "sin", "tab", "acos", "asin", "atan", "atan2", "cosh", "sinh", "tanh",
                "log", "log10", "pow", "sqrt", "abs", "ceil", "floor", "fraction", "closeTo",
                "fpFromIEEE", "fpToIEEE", "complex", "opEquals", "opAddAssign", "opSubAssign",
                "opMulAssign", "opDivAssign", "opAdd", "opSub", "opMul", "opDiv",
            ])
            .with_rule(DOUBLE_QUOTED_STRING, PaletteIndex::String)
            .with_rule(CHAR_LITERAL, PaletteIndex::String)
            .with_rule(FLOAT_NUMBER, PaletteIndex::Number)
            .with_rule(INT_NUMBER, PaletteIndex::Number)
            .with_rule(OCTAL_NUMBER, PaletteIndex::Number)
            .with_rule(HEX_NUMBER, PaletteIndex::Number)
            .with_rule(IDENTIFIER, PaletteIndex::Identifier)
            .with_rule(PUNCTUATION, PaletteIndex::Punctuation)
    }

    /// Lua: `--` line comments and `--[[ ]]` blocks.
    pub fn lua() -> Self {
        LanguageDefinition::new("Lua")
            .with_comments(CommentConfig::line_and_block("--", "--[[", "]]"))
            .with_keywords([
                "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "if",
                "in", "local", "nil", "not", "or", "repeat", "return", "then", "true", "until",
                "while",
            ])
            .with_builtin_functions([
                "assert", "collectgarbage", "dofile", "error", "getmetatable", "ipairs",
                "loadfile", "load", "loadstring", "next", "pairs", "pcall", "print", "rawequal",
                "rawlen", "rawget", "rawset", "select", "setmetatable", "tonumber", "tostring",
                "type", "xpcall", "_G", "_VERSION", "require", "module", "coroutine", "table",
                "io", "os", "string", "utf8", "bit32", "math", "debug", "package", "byte",
                "char", "find", "format", "gmatch", "gsub", "len", "lower", "match", "rep",
                "reverse", "sub", "upper", "concat", "insert", "remove", "sort", "unpack",
                "abs", "ceil", "floor", "max", "min", "sqrt", "random", "randomseed", "huge",
                "pi", "clock", "date", "time", "getenv", "exit",
            ])
            .with_rule(DOUBLE_QUOTED_STRING, PaletteIndex::String)
            .with_rule(SINGLE_QUOTED_STRING, PaletteIndex::String)
            .with_rule(HEX_NUMBER, PaletteIndex::Number)
            .with_rule(FLOAT_NUMBER, PaletteIndex::Number)
            .with_rule(INT_NUMBER, PaletteIndex::Number)
            .with_rule(IDENTIFIER, PaletteIndex::Identifier)
            .with_rule(PUNCTUATION, PaletteIndex::Punctuation)
            .without_auto_indentation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_names() {
        let names: Vec<String> = BuiltinLanguage::ALL
            .iter()
            .map(|lang| lang.definition().name)
            .collect();
        assert_eq!(
            names,
            vec!["C++", "C", "HLSL", "GLSL", "SQL", "AngelScript", "Lua"]
        );
    }

    #[test]
    fn test_cpp_uses_tokenizer_and_shaders_use_rules() {
        let cpp = LanguageDefinition::cplusplus();
        assert!(cpp.tokenize.is_some());
        assert!(cpp.token_rules.is_empty());

        let hlsl = LanguageDefinition::hlsl();
        assert!(hlsl.tokenize.is_none());
        assert_eq!(hlsl.token_rules[0].class, PaletteIndex::Preprocessor);
        assert!(hlsl.is_keyword("float4x4"));
        assert!(hlsl.is_keyword("half2"));
        assert!(hlsl.known_identifier("saturate").is_some());
    }

    #[test]
    fn test_sql_and_lua_flags() {
        let sql = LanguageDefinition::sql();
        assert!(!sql.case_sensitive);
        assert!(!sql.auto_indentation);
        assert!(sql.is_keyword("select"));

        let lua = LanguageDefinition::lua();
        assert_eq!(lua.comments.line_token(), Some(&b"--"[..]));
        assert_eq!(lua.comments.block_tokens(), Some((&b"--[["[..], &b"]]"[..])));
        assert!(!lua.auto_indentation);
    }
}
