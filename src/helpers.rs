//! Built-in allow-list of transpiler helper function names.
//!
//! These are the utility routines the transpiler inlines into every compiled
//! module. None of the names carries the underscore prefix; the prefix is
//! matched and stripped separately.

/// Helper names consolidated when no allow-list is configured.
pub const DEFAULT_HELPERS: &[&str] = &[
    "typeof",
    "jsx",
    "asyncIterator",
    "asyncGenerator",
    "asyncGeneratorDelegate",
    "asyncToGenerator",
    "classCallCheck",
    "createClass",
    "defineEnumerableProperties",
    "defaults",
    "defineProperty",
    "extends",
    "get",
    "inherits",
    "instanceof",
    "interopRequireDefault",
    "interopRequireWildcard",
    "newArrowCheck",
    "objectDestructuringEmpty",
    "objectWithoutProperties",
    "possibleConstructorReturn",
    "selfGlobal",
    "set",
    "slicedToArray",
    "slicedToArrayLoose",
    "taggedTemplateLiteral",
    "taggedTemplateLiteralLoose",
    "temporalRef",
    "temporalUndefined",
    "toArray",
    "toConsumableArray",
];
