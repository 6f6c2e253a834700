#[cfg(test)]
pub const POST_DATA: &str = "---
title: \"Hello World\"
date: \"2024-02-29\"
tags: [\"rust\", \"cli\"]
lastmod: \"2024-02-29\"
draft: false
summary: \n---
**Hello World**

Start writing your post here...
";

#[cfg(test)]
pub const POST_DATA_NO_TAGS: &str = "---
title: \"Hello World\"
date: \"2024-02-29\"
tags: []
lastmod: \"2024-02-29\"
draft: false
summary: \n---
**Hello World**

Start writing your post here...
";
