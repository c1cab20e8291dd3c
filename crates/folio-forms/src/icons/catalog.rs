//! Icon names offered by the picker, in Iconify `prefix:name` form.

pub const TABLER_ICONS: &[&str] = &[
  "tabler:activity",
  "tabler:adjustments",
  "tabler:affiliate",
  "tabler:alarm",
  "tabler:album",
  "tabler:alert-circle",
  "tabler:alert-triangle",
  "tabler:align-center",
  "tabler:align-justified",
  "tabler:align-left",
  "tabler:align-right",
  "tabler:anchor",
  "tabler:antenna",
  "tabler:aperture",
  "tabler:api",
  "tabler:app-window",
  "tabler:apps",
  "tabler:archive",
  "tabler:arrow-back",
  "tabler:arrow-down",
  "tabler:arrow-forward",
  "tabler:arrow-left",
  "tabler:arrow-right",
  "tabler:arrow-up",
  "tabler:arrows-maximize",
  "tabler:arrows-minimize",
  "tabler:artboard",
  "tabler:at",
  "tabler:atom",
  "tabler:award",
  "tabler:backpack",
  "tabler:badge",
  "tabler:ball-basketball",
  "tabler:ball-football",
  "tabler:ban",
  "tabler:bandage",
  "tabler:barcode",
  "tabler:battery",
  "tabler:bell",
  "tabler:bike",
  "tabler:binary",
  "tabler:blockquote",
  "tabler:bluetooth",
  "tabler:bold",
  "tabler:bolt",
  "tabler:book",
  "tabler:bookmark",
  "tabler:bookmarks",
  "tabler:box",
  "tabler:brackets",
  "tabler:brain",
  "tabler:brand-android",
  "tabler:brand-angular",
  "tabler:brand-apple",
  "tabler:brand-aws",
  "tabler:brand-azure",
  "tabler:brand-bitbucket",
  "tabler:brand-bootstrap",
  "tabler:brand-c-sharp",
  "tabler:brand-chrome",
  "tabler:brand-cloudflare",
  "tabler:brand-codepen",
  "tabler:brand-cpp",
  "tabler:brand-css3",
  "tabler:brand-databricks",
  "tabler:brand-deno",
  "tabler:brand-django",
  "tabler:brand-docker",
  "tabler:brand-dribbble",
  "tabler:brand-figma",
  "tabler:brand-firebase",
  "tabler:brand-flutter",
  "tabler:brand-framer",
  "tabler:brand-gatsby",
  "tabler:brand-git",
  "tabler:brand-github",
  "tabler:brand-gitlab",
  "tabler:brand-golang",
  "tabler:brand-google",
  "tabler:brand-google-drive",
  "tabler:brand-graphql",
  "tabler:brand-html5",
  "tabler:brand-instagram",
  "tabler:brand-javascript",
  "tabler:brand-kotlin",
  "tabler:brand-laravel",
  "tabler:brand-linkedin",
  "tabler:brand-linux",
  "tabler:brand-markdown",
  "tabler:brand-medium",
  "tabler:brand-mongodb",
  "tabler:brand-mysql",
  "tabler:brand-nextjs",
  "tabler:brand-nodejs",
  "tabler:brand-npm",
  "tabler:brand-nuxt",
  "tabler:brand-openai",
  "tabler:brand-php",
  "tabler:brand-pnpm",
  "tabler:brand-prisma",
  "tabler:brand-python",
  "tabler:brand-react",
  "tabler:brand-react-native",
  "tabler:brand-redux",
  "tabler:brand-rust",
  "tabler:brand-sass",
  "tabler:brand-slack",
  "tabler:brand-stackoverflow",
  "tabler:brand-storybook",
  "tabler:brand-stripe",
  "tabler:brand-supabase",
  "tabler:brand-svelte",
  "tabler:brand-swift",
  "tabler:brand-tailwind",
  "tabler:brand-terraform",
  "tabler:brand-threejs",
  "tabler:brand-twitter",
  "tabler:brand-typescript",
  "tabler:brand-ubuntu",
  "tabler:brand-vercel",
  "tabler:brand-vite",
  "tabler:brand-vscode",
  "tabler:brand-vue",
  "tabler:brand-webflow",
  "tabler:brand-windows",
  "tabler:brand-wordpress",
  "tabler:brand-x",
  "tabler:brand-youtube",
  "tabler:briefcase",
  "tabler:brush",
  "tabler:bucket",
  "tabler:bug",
  "tabler:building",
  "tabler:building-bank",
  "tabler:building-store",
  "tabler:bulb",
  "tabler:calculator",
  "tabler:calendar",
  "tabler:calendar-event",
  "tabler:camera",
  "tabler:certificate",
  "tabler:chart-arcs",
  "tabler:chart-area",
  "tabler:chart-bar",
  "tabler:chart-dots",
  "tabler:chart-line",
  "tabler:chart-pie",
  "tabler:check",
  "tabler:checkbox",
  "tabler:checklist",
  "tabler:chess",
  "tabler:chevron-down",
  "tabler:chevron-left",
  "tabler:chevron-right",
  "tabler:chevron-up",
  "tabler:circle",
  "tabler:circle-check",
  "tabler:circle-x",
  "tabler:clipboard",
  "tabler:clock",
  "tabler:cloud",
  "tabler:cloud-computing",
  "tabler:cloud-upload",
  "tabler:code",
  "tabler:code-dots",
  "tabler:coffee",
  "tabler:coin",
  "tabler:columns",
  "tabler:command",
  "tabler:compass",
  "tabler:components",
  "tabler:cpu",
  "tabler:credit-card",
  "tabler:crop",
  "tabler:crown",
  "tabler:cube",
  "tabler:cursor-text",
  "tabler:database",
  "tabler:database-export",
  "tabler:device-desktop",
  "tabler:device-floppy",
  "tabler:device-gamepad",
  "tabler:device-laptop",
  "tabler:device-mobile",
  "tabler:device-tablet",
  "tabler:devices",
  "tabler:diamond",
  "tabler:dice",
  "tabler:discount",
  "tabler:dna",
  "tabler:door",
  "tabler:download",
  "tabler:drone",
  "tabler:droplet",
  "tabler:edit",
  "tabler:egg",
  "tabler:emergency-bed",
  "tabler:engine",
  "tabler:equal",
  "tabler:eraser",
  "tabler:exchange",
  "tabler:external-link",
  "tabler:eye",
  "tabler:feather",
  "tabler:file",
  "tabler:file-code",
  "tabler:file-text",
  "tabler:files",
  "tabler:filter",
  "tabler:fingerprint",
  "tabler:flag",
  "tabler:flame",
  "tabler:flask",
  "tabler:focus",
  "tabler:folder",
  "tabler:folders",
  "tabler:forms",
  "tabler:friends",
  "tabler:function",
  "tabler:gauge",
  "tabler:gift",
  "tabler:git-branch",
  "tabler:git-commit",
  "tabler:git-fork",
  "tabler:git-merge",
  "tabler:git-pull-request",
  "tabler:glass",
  "tabler:globe",
  "tabler:grid-dots",
  "tabler:hammer",
  "tabler:hand-finger",
  "tabler:hash",
  "tabler:headphones",
  "tabler:heart",
  "tabler:help",
  "tabler:hexagon",
  "tabler:hierarchy",
  "tabler:history",
  "tabler:home",
  "tabler:hourglass",
  "tabler:id",
  "tabler:infinity",
  "tabler:info-circle",
  "tabler:key",
  "tabler:keyboard",
  "tabler:language",
  "tabler:layers-intersect",
  "tabler:layout",
  "tabler:layout-dashboard",
  "tabler:leaf",
  "tabler:lego",
  "tabler:lifebuoy",
  "tabler:link",
  "tabler:list",
  "tabler:list-check",
  "tabler:list-numbers",
  "tabler:loader",
  "tabler:lock",
  "tabler:logic-and",
  "tabler:logout",
  "tabler:mail",
  "tabler:map",
  "tabler:map-pin",
  "tabler:markdown",
  "tabler:math",
  "tabler:medal",
  "tabler:message",
  "tabler:message-circle",
  "tabler:microphone",
  "tabler:mood-smile",
  "tabler:moon",
  "tabler:mouse",
  "tabler:movie",
  "tabler:music",
  "tabler:network",
  "tabler:news",
  "tabler:notebook",
  "tabler:notes",
  "tabler:package",
  "tabler:paint",
  "tabler:palette",
  "tabler:paperclip",
  "tabler:pencil",
  "tabler:phone",
  "tabler:photo",
  "tabler:pin",
  "tabler:plane",
  "tabler:planet",
  "tabler:plug",
  "tabler:plus",
  "tabler:point",
  "tabler:presentation",
  "tabler:printer",
  "tabler:prompt",
  "tabler:puzzle",
  "tabler:qrcode",
  "tabler:question-mark",
  "tabler:radar",
  "tabler:receipt",
  "tabler:recycle",
  "tabler:refresh",
  "tabler:report",
  "tabler:robot",
  "tabler:rocket",
  "tabler:route",
  "tabler:router",
  "tabler:ruler",
  "tabler:satellite",
  "tabler:school",
  "tabler:scissors",
  "tabler:script",
  "tabler:search",
  "tabler:seeding",
  "tabler:send",
  "tabler:server",
  "tabler:server-2",
  "tabler:settings",
  "tabler:share",
  "tabler:shield",
  "tabler:shield-check",
  "tabler:shopping-cart",
  "tabler:sitemap",
  "tabler:sparkles",
  "tabler:speakerphone",
  "tabler:stack",
  "tabler:stack-2",
  "tabler:star",
  "tabler:sun",
  "tabler:switch",
  "tabler:table",
  "tabler:tag",
  "tabler:tags",
  "tabler:target",
  "tabler:terminal",
  "tabler:terminal-2",
  "tabler:test-pipe",
  "tabler:tools",
  "tabler:trash",
  "tabler:trending-up",
  "tabler:trophy",
  "tabler:truck",
  "tabler:typography",
  "tabler:umbrella",
  "tabler:upload",
  "tabler:user",
  "tabler:user-circle",
  "tabler:users",
  "tabler:vector",
  "tabler:video",
  "tabler:wand",
  "tabler:wifi",
  "tabler:world",
  "tabler:writing",
  "tabler:x",
  "tabler:zoom-code",
];
