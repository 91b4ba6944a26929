//! Built-in content-management schema
//!
//! Forty-two entities, ranked so that every table is created after the tables
//! it references. The `const` assertion at the bottom of this file rejects a
//! broken ordering at compile time.

use super::definition::{
    column, foreign_key, index, unique_index, ColumnShape, ColumnType, EntityShape,
};
use super::registry::{check_entries, RegistryEntry};

use ColumnType::{BigInt, Boolean, DateTime, Guid, Integer, LongText, Text};

const NOW: &str = "CURRENT_TIMESTAMP";

const fn text(name: &'static str, len: u32) -> ColumnShape {
    column(name, Text(Some(len)))
}

const fn int(name: &'static str) -> ColumnShape {
    column(name, Integer)
}

const fn flag(name: &'static str) -> ColumnShape {
    column(name, Boolean).default("0")
}

const fn id(pk: &'static str) -> ColumnShape {
    column("id", Integer).identity().primary_key(pk)
}

pub const NODE: EntityShape = EntityShape {
    ident: "NodeDto",
    table_name: Some("appNode"),
    columns: &[
        id("PK_appNode"),
        flag("trashed"),
        int("parentId"),
        int("nodeUser").nullable(),
        int("level"),
        text("path", 150),
        int("sortOrder"),
        column("uniqueID", Guid).nullable(),
        text("text", 255).nullable(),
        column("nodeObjectType", Guid).nullable(),
        column("createDate", DateTime).default(NOW),
    ],
    indexes: &[
        index("IX_appNode_parentId", "parentId"),
        index("IX_appNode_ObjectType", "nodeObjectType"),
        unique_index("IX_appNode_UniqueID", "uniqueID"),
    ],
    foreign_keys: &[foreign_key("FK_appNode_appNode", "parentId", "appNode", "id")],
};

pub const TEMPLATE: EntityShape = EntityShape {
    ident: "TemplateDto",
    table_name: Some("cmsTemplate"),
    columns: &[
        column("pk", Integer).identity().primary_key("PK_cmsTemplate"),
        int("nodeId"),
        text("alias", 100).nullable(),
        column("design", LongText),
    ],
    indexes: &[unique_index("IX_cmsTemplate_nodeId", "nodeId")],
    foreign_keys: &[foreign_key("FK_cmsTemplate_appNode", "nodeId", "appNode", "id")],
};

pub const CONTENT: EntityShape = EntityShape {
    ident: "ContentDto",
    table_name: Some("cmsContent"),
    columns: &[
        column("pk", Integer).identity().primary_key("PK_cmsContent"),
        int("nodeId"),
        int("contentType"),
    ],
    indexes: &[unique_index("IX_cmsContent_nodeId", "nodeId")],
    foreign_keys: &[foreign_key("FK_cmsContent_appNode", "nodeId", "appNode", "id")],
};

pub const CONTENT_VERSION: EntityShape = EntityShape {
    ident: "ContentVersionDto",
    table_name: Some("cmsContentVersion"),
    columns: &[
        id("PK_cmsContentVersion"),
        int("ContentId"),
        column("VersionId", Guid),
        column("VersionDate", DateTime).default(NOW),
    ],
    indexes: &[unique_index("IX_cmsContentVersion_VersionId", "VersionId")],
    foreign_keys: &[foreign_key(
        "FK_cmsContentVersion_cmsContent",
        "ContentId",
        "cmsContent",
        "nodeId",
    )],
};

pub const DOCUMENT: EntityShape = EntityShape {
    ident: "DocumentDto",
    table_name: Some("cmsDocument"),
    columns: &[
        int("nodeId"),
        column("published", Boolean),
        int("documentUser"),
        column("versionId", Guid).primary_key("PK_cmsDocument"),
        text("text", 255),
        column("releaseDate", DateTime).nullable(),
        column("expireDate", DateTime).nullable(),
        column("updateDate", DateTime).default(NOW),
        int("templateId").nullable(),
        text("alias", 255).nullable(),
        flag("newest"),
    ],
    indexes: &[
        index("IX_cmsDocument_nodeId", "nodeId"),
        index("IX_cmsDocument_newest", "newest"),
    ],
    foreign_keys: &[
        foreign_key("FK_cmsDocument_appNode", "nodeId", "appNode", "id"),
        foreign_key("FK_cmsDocument_cmsTemplate", "templateId", "cmsTemplate", "nodeId"),
    ],
};

pub const CONTENT_TYPE: EntityShape = EntityShape {
    ident: "ContentTypeDto",
    table_name: Some("cmsContentType"),
    columns: &[
        column("pk", Integer).identity().primary_key("PK_cmsContentType"),
        int("nodeId"),
        text("alias", 255).nullable(),
        text("icon", 255).nullable(),
        text("thumbnail", 255).default("'folder.png'"),
        text("description", 1500).nullable(),
        flag("isContainer"),
        flag("allowAtRoot"),
    ],
    indexes: &[
        unique_index("IX_cmsContentType_nodeId", "nodeId"),
        index("IX_cmsContentType_icon", "icon"),
    ],
    foreign_keys: &[foreign_key("FK_cmsContentType_appNode", "nodeId", "appNode", "id")],
};

pub const DOCUMENT_TYPE: EntityShape = EntityShape {
    ident: "DocumentTypeDto",
    table_name: Some("cmsDocumentType"),
    columns: &[
        int("contentTypeNodeId").primary_key("PK_cmsDocumentType"),
        int("templateNodeId").primary_key("PK_cmsDocumentType"),
        flag("IsDefault"),
    ],
    indexes: &[],
    foreign_keys: &[
        foreign_key(
            "FK_cmsDocumentType_cmsContentType",
            "contentTypeNodeId",
            "cmsContentType",
            "nodeId",
        ),
        foreign_key("FK_cmsDocumentType_appNode", "contentTypeNodeId", "appNode", "id"),
        foreign_key(
            "FK_cmsDocumentType_cmsTemplate",
            "templateNodeId",
            "cmsTemplate",
            "nodeId",
        ),
    ],
};

pub const DATA_TYPE: EntityShape = EntityShape {
    ident: "DataTypeDto",
    table_name: Some("cmsDataType"),
    columns: &[
        column("pk", Integer).identity().primary_key("PK_cmsDataType"),
        int("nodeId"),
        text("propertyEditorAlias", 255),
        text("dbType", 50),
    ],
    indexes: &[unique_index("IX_cmsDataType_nodeId", "nodeId")],
    foreign_keys: &[foreign_key("FK_cmsDataType_appNode", "nodeId", "appNode", "id")],
};

pub const DATA_TYPE_PRE_VALUE: EntityShape = EntityShape {
    ident: "DataTypePreValueDto",
    table_name: Some("cmsDataTypePreValues"),
    columns: &[
        id("PK_cmsDataTypePreValues"),
        int("datatypeNodeId"),
        column("value", LongText).nullable(),
        int("sortorder"),
        text("alias", 50).nullable(),
    ],
    indexes: &[],
    foreign_keys: &[foreign_key(
        "FK_cmsDataTypePreValues_cmsDataType",
        "datatypeNodeId",
        "cmsDataType",
        "nodeId",
    )],
};

pub const DICTIONARY: EntityShape = EntityShape {
    ident: "DictionaryDto",
    table_name: Some("cmsDictionary"),
    columns: &[
        column("pk", Integer).identity().primary_key("PK_cmsDictionary"),
        column("id", Guid),
        column("parent", Guid).nullable(),
        text("key", 450),
    ],
    indexes: &[unique_index("IX_cmsDictionary_id", "id")],
    foreign_keys: &[foreign_key(
        "FK_cmsDictionary_cmsDictionary",
        "parent",
        "cmsDictionary",
        "id",
    )],
};

pub const LANGUAGE: EntityShape = EntityShape {
    ident: "LanguageDto",
    table_name: Some("appLanguage"),
    columns: &[
        id("PK_appLanguage"),
        text("languageISOCode", 10).nullable(),
        text("languageCultureName", 100).nullable(),
    ],
    indexes: &[unique_index("IX_appLanguage_languageISOCode", "languageISOCode")],
    foreign_keys: &[],
};

pub const LANGUAGE_TEXT: EntityShape = EntityShape {
    ident: "LanguageTextDto",
    table_name: Some("cmsLanguageText"),
    columns: &[
        column("pk", Integer).identity().primary_key("PK_cmsLanguageText"),
        int("languageId"),
        column("UniqueId", Guid),
        text("value", 1000),
    ],
    indexes: &[],
    foreign_keys: &[
        foreign_key(
            "FK_cmsLanguageText_cmsDictionary",
            "UniqueId",
            "cmsDictionary",
            "id",
        ),
        foreign_key(
            "FK_cmsLanguageText_appLanguage",
            "languageId",
            "appLanguage",
            "id",
        ),
    ],
};

pub const DOMAIN: EntityShape = EntityShape {
    ident: "DomainDto",
    table_name: Some("appDomains"),
    columns: &[
        id("PK_appDomains"),
        int("domainDefaultLanguage").nullable(),
        int("domainRootStructureID").nullable(),
        text("domainName", 255),
    ],
    indexes: &[],
    foreign_keys: &[foreign_key(
        "FK_appDomains_appNode",
        "domainRootStructureID",
        "appNode",
        "id",
    )],
};

pub const LOG: EntityShape = EntityShape {
    ident: "LogDto",
    table_name: Some("appLog"),
    columns: &[
        id("PK_appLog"),
        int("userId"),
        int("NodeId"),
        column("Datestamp", DateTime).default(NOW),
        text("logHeader", 50),
        text("logComment", 4000).nullable(),
    ],
    indexes: &[index("IX_appLog_NodeId", "NodeId")],
    foreign_keys: &[],
};

pub const MACRO: EntityShape = EntityShape {
    ident: "MacroDto",
    table_name: Some("cmsMacro"),
    columns: &[
        id("PK_cmsMacro"),
        flag("macroUseInEditor"),
        int("macroRefreshRate").default("0"),
        text("macroAlias", 255),
        text("macroName", 255).nullable(),
        text("macroScriptType", 255).nullable(),
        text("macroScriptAssembly", 255).nullable(),
        text("macroXSLT", 255).nullable(),
        column("macroCacheByPage", Boolean).default("1"),
        flag("macroCachePersonalized"),
        flag("macroDontRender"),
        text("macroPython", 255).nullable(),
    ],
    indexes: &[unique_index("IX_cmsMacro_macroAlias", "macroAlias")],
    foreign_keys: &[],
};

pub const MACRO_PROPERTY_TYPE: EntityShape = EntityShape {
    ident: "MacroPropertyTypeDto",
    table_name: Some("cmsMacroPropertyType"),
    columns: &[
        id("PK_cmsMacroPropertyType"),
        text("macroPropertyTypeAlias", 50).nullable(),
        text("macroPropertyTypeRenderAssembly", 255).nullable(),
        text("macroPropertyTypeRenderType", 255).nullable(),
        text("macroPropertyTypeBaseType", 255).nullable(),
    ],
    indexes: &[],
    foreign_keys: &[],
};

pub const MACRO_PROPERTY: EntityShape = EntityShape {
    ident: "MacroPropertyDto",
    table_name: Some("cmsMacroProperty"),
    columns: &[
        id("PK_cmsMacroProperty"),
        flag("macroPropertyHidden"),
        int("macroPropertyType"),
        int("macro"),
        int("macroPropertySortOrder").default("0"),
        text("macroPropertyAlias", 50),
        text("macroPropertyName", 255),
    ],
    indexes: &[],
    foreign_keys: &[
        foreign_key(
            "FK_cmsMacroProperty_cmsMacroPropertyType",
            "macroPropertyType",
            "cmsMacroPropertyType",
            "id",
        ),
        foreign_key("FK_cmsMacroProperty_cmsMacro", "macro", "cmsMacro", "id"),
    ],
};

pub const MEMBER_TYPE: EntityShape = EntityShape {
    ident: "MemberTypeDto",
    table_name: Some("cmsMemberType"),
    columns: &[
        column("pk", Integer).identity().primary_key("PK_cmsMemberType"),
        int("NodeId"),
        int("propertytypeId"),
        flag("memberCanEdit"),
        flag("viewOnProfile"),
    ],
    indexes: &[],
    foreign_keys: &[
        foreign_key("FK_cmsMemberType_appNode", "NodeId", "appNode", "id"),
        foreign_key(
            "FK_cmsMemberType_cmsContentType",
            "NodeId",
            "cmsContentType",
            "nodeId",
        ),
    ],
};

pub const MEMBER: EntityShape = EntityShape {
    ident: "MemberDto",
    table_name: Some("cmsMember"),
    columns: &[
        int("nodeId").primary_key("PK_cmsMember"),
        text("Email", 1000).default("''"),
        text("LoginName", 255).default("''"),
        text("Password", 1000).default("''"),
    ],
    indexes: &[index("IX_cmsMember_LoginName", "LoginName")],
    foreign_keys: &[
        foreign_key("FK_cmsMember_appNode", "nodeId", "appNode", "id"),
        foreign_key("FK_cmsMember_cmsContent", "nodeId", "cmsContent", "nodeId"),
    ],
};

pub const MEMBER_2_MEMBER_GROUP: EntityShape = EntityShape {
    ident: "Member2MemberGroupDto",
    table_name: Some("cmsMember2MemberGroup"),
    columns: &[
        int("Member").primary_key("PK_cmsMember2MemberGroup"),
        int("MemberGroup").primary_key("PK_cmsMember2MemberGroup"),
    ],
    indexes: &[],
    foreign_keys: &[
        foreign_key(
            "FK_cmsMember2MemberGroup_cmsMember",
            "Member",
            "cmsMember",
            "nodeId",
        ),
        foreign_key(
            "FK_cmsMember2MemberGroup_appNode",
            "MemberGroup",
            "appNode",
            "id",
        ),
    ],
};

pub const CONTENT_XML: EntityShape = EntityShape {
    ident: "ContentXmlDto",
    table_name: Some("cmsContentXml"),
    columns: &[
        int("nodeId").primary_key("PK_cmsContentXml"),
        column("xml", LongText),
    ],
    indexes: &[],
    foreign_keys: &[foreign_key(
        "FK_cmsContentXml_cmsContent",
        "nodeId",
        "cmsContent",
        "nodeId",
    )],
};

pub const PREVIEW_XML: EntityShape = EntityShape {
    ident: "PreviewXmlDto",
    table_name: Some("cmsPreviewXml"),
    columns: &[
        int("nodeId").primary_key("PK_cmsPreviewXml"),
        column("versionId", Guid).primary_key("PK_cmsPreviewXml"),
        column("timestamp", DateTime),
        column("xml", LongText),
    ],
    indexes: &[],
    foreign_keys: &[
        foreign_key("FK_cmsPreviewXml_cmsContent", "nodeId", "cmsContent", "nodeId"),
        foreign_key(
            "FK_cmsPreviewXml_cmsContentVersion",
            "versionId",
            "cmsContentVersion",
            "VersionId",
        ),
    ],
};

pub const PROPERTY_TYPE_GROUP: EntityShape = EntityShape {
    ident: "PropertyTypeGroupDto",
    table_name: Some("cmsPropertyTypeGroup"),
    columns: &[
        id("PK_cmsPropertyTypeGroup"),
        int("parentGroupId").nullable(),
        int("contenttypeNodeId"),
        text("text", 255),
        int("sortorder"),
    ],
    indexes: &[],
    foreign_keys: &[
        foreign_key(
            "FK_cmsPropertyTypeGroup_cmsPropertyTypeGroup",
            "parentGroupId",
            "cmsPropertyTypeGroup",
            "id",
        ),
        foreign_key(
            "FK_cmsPropertyTypeGroup_cmsContentType",
            "contenttypeNodeId",
            "cmsContentType",
            "nodeId",
        ),
    ],
};

pub const PROPERTY_TYPE: EntityShape = EntityShape {
    ident: "PropertyTypeDto",
    table_name: Some("cmsPropertyType"),
    columns: &[
        id("PK_cmsPropertyType"),
        int("dataTypeId"),
        int("contentTypeId"),
        int("propertyTypeGroupId").nullable(),
        text("Alias", 255),
        text("Name", 255).nullable(),
        text("helpText", 1000).nullable(),
        int("sortOrder").default("0"),
        flag("mandatory"),
        text("validationRegExp", 255).nullable(),
        text("Description", 2000).nullable(),
    ],
    indexes: &[],
    foreign_keys: &[
        foreign_key(
            "FK_cmsPropertyType_cmsDataType",
            "dataTypeId",
            "cmsDataType",
            "nodeId",
        ),
        foreign_key(
            "FK_cmsPropertyType_cmsContentType",
            "contentTypeId",
            "cmsContentType",
            "nodeId",
        ),
        foreign_key(
            "FK_cmsPropertyType_cmsPropertyTypeGroup",
            "propertyTypeGroupId",
            "cmsPropertyTypeGroup",
            "id",
        ),
    ],
};

pub const PROPERTY_DATA: EntityShape = EntityShape {
    ident: "PropertyDataDto",
    table_name: Some("cmsPropertyData"),
    columns: &[
        id("PK_cmsPropertyData"),
        int("contentNodeId"),
        column("versionId", Guid).nullable(),
        int("propertytypeid"),
        int("dataInt").nullable(),
        column("dataDate", DateTime).nullable(),
        text("dataNvarchar", 500).nullable(),
        column("dataNtext", LongText).nullable(),
    ],
    indexes: &[
        index("IX_cmsPropertyData_contentNodeId", "contentNodeId"),
        index("IX_cmsPropertyData_versionId", "versionId"),
        index("IX_cmsPropertyData_propertytypeid", "propertytypeid"),
    ],
    foreign_keys: &[
        foreign_key(
            "FK_cmsPropertyData_appNode",
            "contentNodeId",
            "appNode",
            "id",
        ),
        foreign_key(
            "FK_cmsPropertyData_cmsPropertyType",
            "propertytypeid",
            "cmsPropertyType",
            "id",
        ),
    ],
};

pub const RELATION_TYPE: EntityShape = EntityShape {
    ident: "RelationTypeDto",
    table_name: Some("appRelationType"),
    columns: &[
        id("PK_appRelationType"),
        column("dual", Boolean),
        column("parentObjectType", Guid),
        column("childObjectType", Guid),
        text("name", 255),
        text("alias", 100).nullable(),
    ],
    indexes: &[unique_index("IX_appRelationType_alias", "alias")],
    foreign_keys: &[],
};

pub const RELATION: EntityShape = EntityShape {
    ident: "RelationDto",
    table_name: Some("appRelation"),
    columns: &[
        id("PK_appRelation"),
        int("parentId"),
        int("childId"),
        int("relType"),
        column("datetime", DateTime).default(NOW),
        text("comment", 1000),
    ],
    indexes: &[],
    foreign_keys: &[
        foreign_key("FK_appRelation_appNode", "parentId", "appNode", "id"),
        foreign_key("FK_appRelation_appNode1", "childId", "appNode", "id"),
        foreign_key(
            "FK_appRelation_appRelationType",
            "relType",
            "appRelationType",
            "id",
        ),
    ],
};

pub const STYLESHEET: EntityShape = EntityShape {
    ident: "StylesheetDto",
    table_name: Some("cmsStylesheet"),
    columns: &[
        int("nodeId").primary_key("PK_cmsStylesheet"),
        text("filename", 100),
        column("content", LongText).nullable(),
    ],
    indexes: &[],
    foreign_keys: &[foreign_key("FK_cmsStylesheet_appNode", "nodeId", "appNode", "id")],
};

pub const STYLESHEET_PROPERTY: EntityShape = EntityShape {
    ident: "StylesheetPropertyDto",
    table_name: Some("cmsStylesheetProperty"),
    columns: &[
        int("nodeId").primary_key("PK_cmsStylesheetProperty"),
        column("stylesheetPropertyEditor", Boolean).nullable(),
        text("stylesheetPropertyAlias", 50).nullable(),
        text("stylesheetPropertyValue", 400).nullable(),
    ],
    indexes: &[],
    foreign_keys: &[foreign_key(
        "FK_cmsStylesheetProperty_appNode",
        "nodeId",
        "appNode",
        "id",
    )],
};

pub const TAG: EntityShape = EntityShape {
    ident: "TagDto",
    table_name: Some("cmsTags"),
    columns: &[
        id("PK_cmsTags"),
        text("tag", 200).nullable(),
        int("ParentId").nullable(),
        text("group", 100).nullable(),
    ],
    indexes: &[index("IX_cmsTags_tag", "tag")],
    foreign_keys: &[foreign_key("FK_cmsTags_cmsTags", "ParentId", "cmsTags", "id")],
};

pub const TAG_RELATIONSHIP: EntityShape = EntityShape {
    ident: "TagRelationshipDto",
    table_name: Some("cmsTagRelationship"),
    columns: &[
        int("nodeId").primary_key("PK_cmsTagRelationship"),
        int("tagId").primary_key("PK_cmsTagRelationship"),
    ],
    indexes: &[],
    foreign_keys: &[
        foreign_key("FK_cmsTagRelationship_appNode", "nodeId", "appNode", "id"),
        foreign_key("FK_cmsTagRelationship_cmsTags", "tagId", "cmsTags", "id"),
    ],
};

pub const USER_LOGIN: EntityShape = EntityShape {
    ident: "UserLoginDto",
    table_name: Some("appUserLogins"),
    columns: &[
        column("contextID", Guid),
        int("userID"),
        column("timeout", BigInt),
    ],
    indexes: &[index("IX_appUserLogins_contextID", "contextID")],
    foreign_keys: &[],
};

pub const USER_TYPE: EntityShape = EntityShape {
    ident: "UserTypeDto",
    table_name: Some("appUserType"),
    columns: &[
        id("PK_appUserType"),
        text("userTypeAlias", 50).nullable(),
        text("userTypeName", 255),
        text("userTypeDefaultPermissions", 50).nullable(),
    ],
    indexes: &[],
    foreign_keys: &[],
};

pub const USER: EntityShape = EntityShape {
    ident: "UserDto",
    table_name: Some("appUser"),
    columns: &[
        id("PK_appUser"),
        flag("userDisabled"),
        flag("userNoConsole"),
        int("userType"),
        int("startStructureID"),
        int("startMediaID").nullable(),
        text("userName", 255),
        text("userLogin", 125),
        text("userPassword", 500),
        text("userEmail", 255),
        text("userDefaultPermissions", 50).nullable(),
        text("userLanguage", 10).nullable(),
    ],
    indexes: &[unique_index("IX_appUser_userLogin", "userLogin")],
    foreign_keys: &[foreign_key(
        "FK_appUser_appUserType",
        "userType",
        "appUserType",
        "id",
    )],
};

pub const TASK_TYPE: EntityShape = EntityShape {
    ident: "TaskTypeDto",
    table_name: Some("cmsTaskType"),
    columns: &[id("PK_cmsTaskType"), text("alias", 255)],
    indexes: &[unique_index("IX_cmsTaskType_alias", "alias")],
    foreign_keys: &[],
};

pub const TASK: EntityShape = EntityShape {
    ident: "TaskDto",
    table_name: Some("cmsTask"),
    columns: &[
        id("PK_cmsTask"),
        flag("closed"),
        int("taskTypeId"),
        int("nodeId"),
        int("parentUserId"),
        int("userId"),
        column("DateTime", DateTime).default(NOW),
        text("Comment", 500).nullable(),
    ],
    indexes: &[],
    foreign_keys: &[
        foreign_key("FK_cmsTask_cmsTaskType", "taskTypeId", "cmsTaskType", "id"),
        foreign_key("FK_cmsTask_appNode", "nodeId", "appNode", "id"),
        foreign_key("FK_cmsTask_appUser", "parentUserId", "appUser", "id"),
        foreign_key("FK_cmsTask_appUser1", "userId", "appUser", "id"),
    ],
};

pub const CONTENT_TYPE_2_CONTENT_TYPE: EntityShape = EntityShape {
    ident: "ContentType2ContentTypeDto",
    table_name: Some("cmsContentType2ContentType"),
    columns: &[
        int("parentContentTypeId").primary_key("PK_cmsContentType2ContentType"),
        int("childContentTypeId").primary_key("PK_cmsContentType2ContentType"),
    ],
    indexes: &[],
    foreign_keys: &[
        foreign_key(
            "FK_cmsContentType2ContentType_appNode_parent",
            "parentContentTypeId",
            "appNode",
            "id",
        ),
        foreign_key(
            "FK_cmsContentType2ContentType_appNode_child",
            "childContentTypeId",
            "appNode",
            "id",
        ),
    ],
};

pub const CONTENT_TYPE_ALLOWED_CONTENT_TYPE: EntityShape = EntityShape {
    ident: "ContentTypeAllowedContentTypeDto",
    table_name: Some("cmsContentTypeAllowedContentType"),
    columns: &[
        int("Id").primary_key("PK_cmsContentTypeAllowedContentType"),
        int("AllowedId").primary_key("PK_cmsContentTypeAllowedContentType"),
        int("SortOrder").default("0"),
    ],
    indexes: &[],
    foreign_keys: &[
        foreign_key(
            "FK_cmsContentTypeAllowedContentType_cmsContentType",
            "Id",
            "cmsContentType",
            "nodeId",
        ),
        foreign_key(
            "FK_cmsContentTypeAllowedContentType_cmsContentType1",
            "AllowedId",
            "cmsContentType",
            "nodeId",
        ),
    ],
};

pub const USER_2_APP: EntityShape = EntityShape {
    ident: "User2AppDto",
    table_name: Some("appUser2app"),
    columns: &[
        int("user").primary_key("PK_user2app"),
        text("app", 50).primary_key("PK_user2app"),
    ],
    indexes: &[],
    foreign_keys: &[foreign_key("FK_appUser2app_appUser", "user", "appUser", "id")],
};

pub const USER_2_NODE_NOTIFY: EntityShape = EntityShape {
    ident: "User2NodeNotifyDto",
    table_name: Some("appUser2NodeNotify"),
    columns: &[
        int("userId").primary_key("PK_appUser2NodeNotify"),
        int("nodeId").primary_key("PK_appUser2NodeNotify"),
        text("action", 1).primary_key("PK_appUser2NodeNotify"),
    ],
    indexes: &[],
    foreign_keys: &[
        foreign_key("FK_appUser2NodeNotify_appUser", "userId", "appUser", "id"),
        foreign_key("FK_appUser2NodeNotify_appNode", "nodeId", "appNode", "id"),
    ],
};

pub const USER_2_NODE_PERMISSION: EntityShape = EntityShape {
    ident: "User2NodePermissionDto",
    table_name: Some("appUser2NodePermission"),
    columns: &[
        int("userId").primary_key("PK_appUser2NodePermission"),
        int("nodeId").primary_key("PK_appUser2NodePermission"),
        text("permission", 255).primary_key("PK_appUser2NodePermission"),
    ],
    indexes: &[],
    foreign_keys: &[
        foreign_key(
            "FK_appUser2NodePermission_appUser",
            "userId",
            "appUser",
            "id",
        ),
        foreign_key(
            "FK_appUser2NodePermission_appNode",
            "nodeId",
            "appNode",
            "id",
        ),
    ],
};

pub const SERVER_REGISTRATION: EntityShape = EntityShape {
    ident: "ServerRegistrationDto",
    table_name: Some("appServer"),
    columns: &[
        id("PK_appServer"),
        text("address", 500),
        text("computerName", 255),
        column("registeredDate", DateTime).default(NOW),
        column("lastNotifiedDate", DateTime),
        column("isActive", Boolean),
    ],
    indexes: &[unique_index("IX_appServer_computerName", "computerName")],
    foreign_keys: &[],
};

/// Creation order of the built-in schema
pub const CMS_SCHEMA: &[RegistryEntry] = &[
    RegistryEntry::new(0, &NODE),
    RegistryEntry::new(1, &TEMPLATE),
    RegistryEntry::new(2, &CONTENT),
    RegistryEntry::new(3, &CONTENT_VERSION),
    RegistryEntry::new(4, &DOCUMENT),
    RegistryEntry::new(5, &CONTENT_TYPE),
    RegistryEntry::new(6, &DOCUMENT_TYPE),
    RegistryEntry::new(7, &DATA_TYPE),
    RegistryEntry::new(8, &DATA_TYPE_PRE_VALUE),
    RegistryEntry::new(9, &DICTIONARY),
    RegistryEntry::new(10, &LANGUAGE),
    RegistryEntry::new(11, &LANGUAGE_TEXT),
    RegistryEntry::new(12, &DOMAIN),
    RegistryEntry::new(13, &LOG),
    RegistryEntry::new(14, &MACRO),
    RegistryEntry::new(15, &MACRO_PROPERTY_TYPE),
    RegistryEntry::new(16, &MACRO_PROPERTY),
    RegistryEntry::new(17, &MEMBER_TYPE),
    RegistryEntry::new(18, &MEMBER),
    RegistryEntry::new(19, &MEMBER_2_MEMBER_GROUP),
    RegistryEntry::new(20, &CONTENT_XML),
    RegistryEntry::new(21, &PREVIEW_XML),
    RegistryEntry::new(22, &PROPERTY_TYPE_GROUP),
    RegistryEntry::new(23, &PROPERTY_TYPE),
    RegistryEntry::new(24, &PROPERTY_DATA),
    RegistryEntry::new(25, &RELATION_TYPE),
    RegistryEntry::new(26, &RELATION),
    RegistryEntry::new(27, &STYLESHEET),
    RegistryEntry::new(28, &STYLESHEET_PROPERTY),
    RegistryEntry::new(29, &TAG),
    RegistryEntry::new(30, &TAG_RELATIONSHIP),
    RegistryEntry::new(31, &USER_LOGIN),
    RegistryEntry::new(32, &USER_TYPE),
    RegistryEntry::new(33, &USER),
    RegistryEntry::new(34, &TASK_TYPE),
    RegistryEntry::new(35, &TASK),
    RegistryEntry::new(36, &CONTENT_TYPE_2_CONTENT_TYPE),
    RegistryEntry::new(37, &CONTENT_TYPE_ALLOWED_CONTENT_TYPE),
    RegistryEntry::new(38, &USER_2_APP),
    RegistryEntry::new(39, &USER_2_NODE_NOTIFY),
    RegistryEntry::new(40, &USER_2_NODE_PERMISSION),
    RegistryEntry::new(41, &SERVER_REGISTRATION),
];

const _: () = match check_entries(CMS_SCHEMA) {
    Ok(()) => (),
    Err(msg) => panic!("{}", msg),
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema::SchemaRegistry;

    #[test]
    fn test_cms_schema_has_42_tables() {
        let registry = SchemaRegistry::cms();
        assert_eq!(registry.len(), 42);
        assert_eq!(registry.table_names()[0], "appNode");
        assert_eq!(registry.table_names()[41], "appServer");
    }

    #[test]
    fn test_cms_schema_runtime_check_agrees() {
        assert!(SchemaRegistry::new(CMS_SCHEMA).is_ok());
    }

    #[test]
    fn test_every_named_constraint_follows_prefix_convention() {
        for def in SchemaRegistry::cms().table_definitions() {
            for idx in &def.indexes {
                assert!(idx.name.starts_with("IX_"), "{}", idx.name);
            }
            for fk in &def.foreign_keys {
                assert!(fk.name.starts_with("FK_"), "{}", fk.name);
            }
            if let Some((pk, _)) = def.primary_key() {
                assert!(pk.starts_with("PK_"), "{}", pk);
            }
        }
    }

    #[test]
    fn test_indexed_and_referenced_columns_exist() {
        let defs = SchemaRegistry::cms().table_definitions();
        let has_column = |table: &str, col: &str| {
            defs.iter()
                .find(|d| d.name == table)
                .map(|d| d.columns.iter().any(|c| c.name == col))
                .unwrap_or(false)
        };
        for def in &defs {
            for idx in &def.indexes {
                assert!(has_column(&def.name, &idx.column_name), "{}", idx.name);
            }
            for fk in &def.foreign_keys {
                assert!(has_column(&def.name, &fk.column_name), "{}", fk.name);
                assert!(
                    has_column(&fk.references_table, &fk.references_column),
                    "{}",
                    fk.name
                );
            }
        }
    }
}
